//! Model merging job lifecycle.

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use reqwest::Method;
use serde_json::{Value, json};

/// Start a merging job over a set of trained models.
pub async fn start_merging(
    client: &ApiClient,
    merging_name: &str,
    models: &[String],
) -> ClientResult<Value> {
    if models.len() < 2 {
        return Err(ClientError::InvalidInput(
            "A merging job needs at least two models".to_string(),
        ));
    }

    let body = json!({
        "merging_name": merging_name,
        "models": models,
    });
    client.request(Method::POST, Route::StartMerging.template(), Some(&body), None).await
}

/// List merging jobs for the current org.
pub async fn list_mergings(client: &ApiClient) -> ClientResult<Vec<Value>> {
    let response = client.request(Method::GET, Route::ListMergings.template(), None, None).await?;
    response
        .as_array()
        .cloned()
        .ok_or_else(|| ClientError::UnexpectedResponse("merging list is not an array".to_string()))
}
