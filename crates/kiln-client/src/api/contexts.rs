//! Document upload into named contexts.

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use reqwest::Method;
use serde_json::{Map, Value, json};

/// A document to upload into a context.
///
/// Anything in `meta` is stored alongside the document and can be filtered
/// on during retrieval and generation.
#[derive(Debug, Clone)]
pub struct Doc {
    /// Document name.
    pub name: String,
    /// Document text.
    pub text: String,
    /// Extra metadata fields.
    pub meta: Map<String, Value>,
}

impl Doc {
    /// Create a document with no metadata.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into(), meta: Map::new() }
    }

    /// Attach a metadata field.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "document": self.text,
            "meta": self.meta,
        })
    }
}

/// Upload a batch of documents to a context.
///
/// Every document must carry a non-empty name and text; validation happens
/// before any network call.
pub async fn upload_docs(client: &ApiClient, context: &str, docs: &[Doc]) -> ClientResult<Value> {
    for doc in docs {
        if doc.name.is_empty() || doc.text.is_empty() {
            return Err(ClientError::InvalidInput(
                "Each document must have a name and text".to_string(),
            ));
        }
    }

    let body = json!({
        "context_name": context,
        "documents": docs.iter().map(Doc::payload).collect::<Vec<_>>(),
    });
    client.request(Method::POST, Route::Contexts.template(), Some(&body), None).await
}

/// Upload a single document to a context.
pub async fn upload_doc(client: &ApiClient, context: &str, doc: Doc) -> ClientResult<Value> {
    upload_docs(client, context, std::slice::from_ref(&doc)).await
}
