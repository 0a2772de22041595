//! Deployment lifecycle for trained models.

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use crate::status::JobStatus;
use reqwest::Method;
use serde_json::{Value, json};

/// Deploy a trained model under a deployment name.
pub async fn start_deployment(
    client: &ApiClient,
    deployment_name: &str,
    model: &str,
) -> ClientResult<Value> {
    let body = json!({
        "deployment_name": deployment_name,
        "model": model,
    });
    client.request(Method::POST, Route::StartDeployment.template(), Some(&body), None).await
}

/// Tear down a deployment.
pub async fn stop_deployment(client: &ApiClient, deployment_name: &str) -> ClientResult<Value> {
    let body = json!({
        "deployment_name": deployment_name,
    });
    client.request(Method::POST, Route::StopDeployment.template(), Some(&body), None).await
}

/// Poll a deployment's status.
pub async fn deployment_status(
    client: &ApiClient,
    id_or_name: &str,
) -> ClientResult<(JobStatus, Value)> {
    let path = Route::DeploymentStatus.resolve(id_or_name);
    let response = client.request(Method::GET, &path, None, None).await?;
    let status = response
        .get("status")
        .and_then(Value::as_str)
        .map(JobStatus::from_remote)
        .ok_or_else(|| {
            ClientError::UnexpectedResponse(
                "deployment status response has no 'status'".to_string(),
            )
        })?;
    Ok((status, response))
}
