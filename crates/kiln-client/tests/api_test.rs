//! Integration tests for the typed platform operations.

use kiln_client::api::{self, Doc, QaPair};
use kiln_client::{
    ApiClient, ClientConfig, ClientError, JobKind, JobStatus, RetryPolicy, TrainedModel,
};
use serde_json::json;
use std::time::Duration;

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    let config = ClientConfig {
        api_key: "abc123".to_string(),
        api_url: server.url(),
        app_url: "https://app.kiln.test".to_string(),
        org: None,
        api_version: "v2".to_string(),
    };
    ApiClient::new(config)
        .unwrap()
        .with_retry_policy(RetryPolicy::new(1, Duration::from_millis(10)).unwrap())
}

#[tokio::test]
async fn test_upload_docs_payload_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/contexts")
        .match_body(mockito::Matcher::Json(json!({
            "context_name": "support",
            "documents": [
                {"name": "faq.txt", "document": "How to reset a password.", "meta": {}},
                {"name": "guide", "document": "Setup steps.", "meta": {"year": 2024}},
            ],
        })))
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let docs = vec![
        Doc::new("faq.txt", "How to reset a password."),
        Doc::new("guide", "Setup steps.").with_meta("year", json!(2024)),
    ];
    api::upload_docs(&client, "support", &docs).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_model_status_parses_id_and_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/models/status/demo")
        .match_query(mockito::Matcher::UrlEncoded("allow_demo".into(), "true".into()))
        .with_status(200)
        .with_body(r#"{"id": "m-42", "status": "training_complete"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let status = api::model_status(&client, "demo").await.unwrap();

    assert_eq!(status.id, "m-42");
    assert_eq!(status.status, JobStatus::TrainingComplete);
}

#[tokio::test]
async fn test_connect_rejects_unfinished_model() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/models/status/slow-model")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": "m-7", "status": "processing"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = TrainedModel::connect(&client, "slow-model").await.unwrap_err();

    match err {
        ClientError::NotReady { name, status } => {
            assert_eq!(name, "slow-model");
            assert_eq!(status, "processing");
        }
        other => panic!("expected NotReady, got: {other}"),
    }
}

#[tokio::test]
async fn test_retrieve_uses_the_resolved_model_id() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/models/status/ready-model")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": "m-9", "status": "training_complete"}"#)
        .create_async()
        .await;
    let retrieve_mock = server
        .mock("POST", "/v2/models/retrieve")
        .match_body(mockito::Matcher::Json(json!({
            "model_id": "m-9",
            "query": "capital of France",
            "size": 3,
            "filters": [],
            "id": "m-9",
        })))
        .with_status(200)
        .with_body(r#"{"contexts": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let model = TrainedModel::connect(&client, "ready-model").await.unwrap();
    let result = model.retrieve("capital of France", 3, &[]).await.unwrap();

    assert_eq!(result, json!({"contexts": []}));
    retrieve_mock.assert_async().await;
}

#[tokio::test]
async fn test_whoami_reads_the_org() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/whoami")
        .with_status(200)
        .with_body(r#"{"org": "acme"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(api::whoami(&client).await.unwrap(), "acme");
}

#[tokio::test]
async fn test_whoami_without_org_is_unexpected_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/whoami")
        .with_status(200)
        .with_body(r#"{"user": "jo"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = api::whoami(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_upload_qa_pairs_payload_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/alignment/qaUpload")
        .match_body(mockito::Matcher::Json(json!({
            "qa_set_name": "faq-set",
            "qa_pairs": [{"question": "Why?", "answer": "Because."}],
        })))
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let pairs = vec![QaPair { question: "Why?".to_string(), answer: "Because.".to_string() }];
    api::upload_qa_pairs(&client, "faq-set", &pairs).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_pretrainings_returns_rows() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/pretraining/list")
        .with_status(200)
        .with_body(r#"[{"name": "cpt-1", "processing_state": "completed"}]"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let rows = api::list_pretrainings(&client).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "cpt-1");
}

#[tokio::test]
async fn test_start_merging_needs_two_models() {
    let server = mockito::Server::new_async().await;
    let client = client_for(&server);

    let err = api::start_merging(&client, "merge-1", &["solo".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));
}

#[tokio::test]
async fn test_start_deployment_payload_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/deployment/start")
        .match_body(mockito::Matcher::Json(json!({
            "deployment_name": "prod-bot",
            "model": "support-bot",
        })))
        .with_status(201)
        .with_body(r#"{"status":"starting"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    api::start_deployment(&client, "prod-bot", "support-bot").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embed_posts_query_and_model_id() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/models/status/embedder")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": "m-3", "status": "training_complete"}"#)
        .create_async()
        .await;
    let embed_mock = server
        .mock("POST", "/v2/models/embed")
        .match_body(mockito::Matcher::Json(json!({
            "model_id": "m-3",
            "query": "reset password",
            "id": "m-3",
        })))
        .with_status(200)
        .with_body(r#"{"embedding": [0.1, 0.2]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let model = TrainedModel::connect(&client, "embedder").await.unwrap();
    model.embed("reset password").await.unwrap();
    embed_mock.assert_async().await;
}

#[tokio::test]
async fn test_download_weights_streams_the_archive() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/alignment/sft-1/weights")
        .with_status(200)
        .with_body(b"weights-bytes")
        .create_async()
        .await;

    let client = client_for(&server);
    let response = api::download_weights(&client, JobKind::Alignment, "sft-1").await.unwrap();
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"weights-bytes");
}
