//! Model and retriever training submission and status polling.

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use crate::status::JobStatus;
use reqwest::Method;
use serde_json::{Value, json};

/// Status report for a training job.
#[derive(Debug, Clone)]
pub struct ModelStatus {
    /// Platform-assigned model id.
    pub id: String,
    /// Current job status.
    pub status: JobStatus,
    /// The full status response, for fields this client does not model.
    pub raw: Value,
}

impl ModelStatus {
    fn from_response(raw: Value) -> ClientResult<Self> {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClientError::UnexpectedResponse("status response has no 'id'".to_string())
            })?
            .to_string();
        let status = raw.get("status").and_then(Value::as_str).ok_or_else(|| {
            ClientError::UnexpectedResponse("status response has no 'status'".to_string())
        })?;
        let status = JobStatus::from_remote(status);
        Ok(Self { id, status, raw })
    }
}

/// Submit a model training job.
pub async fn train_model(
    client: &ApiClient,
    name: &str,
    context: Option<&str>,
    instructions: Option<&str>,
    generator: &str,
) -> ClientResult<Value> {
    let body = json!({
        "name": name,
        "context": context,
        "instructions": instructions,
        "generator": generator,
    });
    client.request(Method::POST, Route::TrainModel.template(), Some(&body), None).await
}

/// Poll the status of a model training job.
pub async fn model_status(client: &ApiClient, id_or_name: &str) -> ClientResult<ModelStatus> {
    let path = Route::TrainModelStatus.resolve(id_or_name);
    let response =
        client.request(Method::GET, &path, None, Some(&[("allow_demo", "true")])).await?;
    ModelStatus::from_response(response)
}

/// Submit a retriever training job.
pub async fn train_retriever(
    client: &ApiClient,
    name: &str,
    context: &str,
) -> ClientResult<Value> {
    let body = json!({
        "name": name,
        "context": context,
    });
    client.request(Method::POST, Route::TrainRetriever.template(), Some(&body), None).await
}

/// Poll the status of a retriever training job.
pub async fn retriever_status(client: &ApiClient, id_or_name: &str) -> ClientResult<ModelStatus> {
    let path = Route::TrainRetrieverStatus.resolve(id_or_name);
    let response = client.request(Method::GET, &path, None, None).await?;
    ModelStatus::from_response(response)
}
