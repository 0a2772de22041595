//! Handle for querying a trained, deployed model.

use crate::api::training::model_status;
use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// How a filter matches against the stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Fuzzy match: the term does not need to appear verbatim.
    FuzzySearch,
    /// Substring match: the exact string must appear in the field.
    StrictSearch,
}

/// A filter applied to retrieve/generate queries.
///
/// `field_name` may be `document` or `name` to filter the document text or
/// title; any other field targets metadata uploaded with the documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Field to filter on.
    pub field_name: String,
    /// Match semantics.
    pub filter_type: FilterType,
    /// Value to search for.
    pub value: String,
}

impl QueryFilter {
    /// Whether this filter targets a metadata field rather than a
    /// reserved document field.
    pub fn is_metadata(&self) -> bool {
        self.field_name != "document" && self.field_name != "name"
    }
}

/// A trained model ready to serve queries.
///
/// Connecting performs one status check and fails with
/// [`ClientError::NotReady`] unless training has completed, so a handle in
/// hand is always servable.
#[derive(Debug)]
pub struct TrainedModel<'a> {
    client: &'a ApiClient,
    name: String,
    model_id: String,
}

impl<'a> TrainedModel<'a> {
    /// Look up the model and verify it finished training.
    pub async fn connect(client: &'a ApiClient, name: &str) -> ClientResult<Self> {
        let status = model_status(client, name).await?;
        if !status.status.is_complete() {
            return Err(ClientError::NotReady {
                name: name.to_string(),
                status: status.status.to_string(),
            });
        }
        Ok(Self { client, name: name.to_string(), model_id: status.id })
    }

    /// The model name this handle was connected with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The platform-assigned model id.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn invoke(
        &self,
        route: Route,
        query: &str,
        size: usize,
        filters: &[QueryFilter],
    ) -> ClientResult<Value> {
        let body = json!({
            "model_id": self.model_id,
            "query": query,
            "size": size,
            "filters": filters,
            "id": self.model_id,
        });
        self.client.request(Method::POST, route.template(), Some(&body), None).await
    }

    /// Retrieve up to `size` contexts relevant to `query`.
    pub async fn retrieve(
        &self,
        query: &str,
        size: usize,
        filters: &[QueryFilter],
    ) -> ClientResult<Value> {
        self.invoke(Route::Retrieve, query, size, filters).await
    }

    /// Generate a response to `query`, grounded on up to `size` contexts.
    pub async fn generate(
        &self,
        query: &str,
        size: usize,
        filters: &[QueryFilter],
    ) -> ClientResult<Value> {
        self.invoke(Route::Generate, query, size, filters).await
    }

    /// Embed `query` with the model's retriever encoder.
    pub async fn embed(&self, query: &str) -> ClientResult<Value> {
        let body = json!({
            "model_id": self.model_id,
            "query": query,
            "id": self.model_id,
        });
        self.client.request(Method::POST, Route::Embed.template(), Some(&body), None).await
    }
}
