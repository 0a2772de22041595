//! Identity and organization lookup.

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use reqwest::Method;
use serde_json::Value;

/// The organization the configured API key belongs to.
pub async fn whoami(client: &ApiClient) -> ClientResult<String> {
    let response = client.request(Method::GET, Route::Whoami.template(), None, None).await?;
    response
        .get("org")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| ClientError::UnexpectedResponse("whoami response has no 'org'".to_string()))
}
