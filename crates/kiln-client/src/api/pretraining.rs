//! Pretraining job lifecycle.

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use reqwest::Method;
use serde_json::{Value, json};

/// Register an S3 folder as a pretraining corpus.
pub async fn upload_corpus_folder(
    client: &ApiClient,
    corpus: &str,
    s3_folder_url: &str,
) -> ClientResult<Value> {
    if !s3_folder_url.starts_with("s3://") {
        return Err(ClientError::InvalidInput("s3_folder_url must be an S3 url".to_string()));
    }

    let body = json!({
        "corpus_name": corpus,
        "s3_folder_url": s3_folder_url,
    });
    client.request(Method::POST, Route::CorpusUpload.template(), Some(&body), None).await
}

/// Start pretraining a model on a registered corpus.
pub async fn start_pretraining(
    client: &ApiClient,
    pretraining_name: &str,
    corpus: &str,
    base_model: &str,
) -> ClientResult<Value> {
    let body = json!({
        "pretraining_name": pretraining_name,
        "corpus_name": corpus,
        "base_model": base_model,
    });
    client.request(Method::POST, Route::StartPretraining.template(), Some(&body), None).await
}

/// List pretraining jobs for the current org.
pub async fn list_pretrainings(client: &ApiClient) -> ClientResult<Vec<Value>> {
    let response =
        client.request(Method::GET, Route::ListPretrainings.template(), None, None).await?;
    response.as_array().cloned().ok_or_else(|| {
        ClientError::UnexpectedResponse("pretraining list is not an array".to_string())
    })
}
