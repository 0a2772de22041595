//! Alignment job lifecycle: QA set upload and training submission.

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Per-call cap on uploaded QA pairs.
pub const MAX_QA_PAIRS_PER_UPLOAD: usize = 2000;

/// A question/answer pair for alignment training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    /// The question.
    pub question: String,
    /// The answer.
    pub answer: String,
}

/// Upload QA pairs to a named QA set.
///
/// At most [`MAX_QA_PAIRS_PER_UPLOAD`] pairs per call; every pair must have
/// a non-empty question and answer. Both checks happen before any network
/// call.
pub async fn upload_qa_pairs(
    client: &ApiClient,
    qa_set: &str,
    pairs: &[QaPair],
) -> ClientResult<Value> {
    if pairs.len() > MAX_QA_PAIRS_PER_UPLOAD {
        return Err(ClientError::InvalidInput(format!(
            "You can only upload {} QA pairs at a time",
            MAX_QA_PAIRS_PER_UPLOAD
        )));
    }
    for pair in pairs {
        if pair.question.is_empty() || pair.answer.is_empty() {
            return Err(ClientError::InvalidInput(
                "Each QA pair must have a question and an answer".to_string(),
            ));
        }
    }

    let body = json!({
        "qa_set_name": qa_set,
        "qa_pairs": pairs,
    });
    client.request(Method::POST, Route::QaUpload.template(), Some(&body), None).await
}

/// Start aligning a pretrained model against a QA set.
pub async fn start_alignment(
    client: &ApiClient,
    alignment_name: &str,
    qa_set: &str,
    pretrained_model: &str,
) -> ClientResult<Value> {
    let body = json!({
        "alignment_name": alignment_name,
        "qa_set_name": qa_set,
        "pretrained_model": pretrained_model,
    });
    client.request(Method::POST, Route::StartAlignment.template(), Some(&body), None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn offline_client() -> ApiClient {
        let config = ClientConfig {
            api_key: "k".to_string(),
            api_url: "http://127.0.0.1:1".to_string(),
            app_url: "http://127.0.0.1:1".to_string(),
            org: None,
            api_version: "v2".to_string(),
        };
        ApiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_batch_over_cap_rejected_before_dispatch() {
        let client = offline_client();
        let pairs = vec![
            QaPair { question: "q".to_string(), answer: "a".to_string() };
            MAX_QA_PAIRS_PER_UPLOAD + 1
        ];
        let err = upload_qa_pairs(&client, "set", &pairs).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_empty_answer_rejected_before_dispatch() {
        let client = offline_client();
        let pairs = vec![QaPair { question: "q".to_string(), answer: String::new() }];
        let err = upload_qa_pairs(&client, "set", &pairs).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }
}
