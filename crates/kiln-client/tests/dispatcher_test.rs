//! Integration tests for the request dispatcher against a stubbed server.

use kiln_client::{ApiClient, AUTH_HEADER, ClientConfig, ClientError, ORG_HEADER, RetryPolicy};
use reqwest::Method;
use serde_json::json;
use std::time::Duration;

fn config_for(server: &mockito::ServerGuard) -> ClientConfig {
    ClientConfig {
        api_key: "abc123".to_string(),
        api_url: server.url(),
        app_url: "https://app.kiln.test".to_string(),
        org: None,
        api_version: "v2".to_string(),
    }
}

fn fail_fast(client: ApiClient) -> ApiClient {
    client.with_retry_policy(RetryPolicy::new(1, Duration::from_millis(10)).unwrap())
}

#[tokio::test]
async fn test_example_scenario() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/contexts")
        .match_header(AUTH_HEADER, "abc123")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(json!({
            "context_name": "demo",
            "documents": [],
        })))
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server)).unwrap();
    let body = json!({"context_name": "demo", "documents": []});
    let result = client.request(Method::POST, "contexts", Some(&body), None).await.unwrap();

    assert_eq!(result, json!({"status": "ok"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_accepted_status_codes_parse_body() {
    for status in [200, 201, 202] {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/contexts")
            .with_status(status)
            .with_body(r#"{"accepted":true}"#)
            .create_async()
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let result = client
            .send(Method::POST, "contexts", Some(&json!({})), None, None)
            .await
            .unwrap();

        assert_eq!(result, json!({"accepted": true}));
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_rejected_status_codes_surface_body_text() {
    for status in [400u16, 401, 404, 500] {
        let mut server = mockito::Server::new_async().await;
        let stub_body = format!("remote says no ({})", status);
        server
            .mock("GET", "/v2/whoami")
            .with_status(usize::from(status))
            .with_body(&stub_body)
            .create_async()
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let err = client.send(Method::GET, "whoami", None, None, None).await.unwrap_err();

        match err {
            ClientError::Api { status: got, ref body } => {
                assert_eq!(got, status);
                assert_eq!(body, &stub_body);
            }
            other => panic!("expected Api error, got: {other}"),
        }
        assert!(err.to_string().contains(&stub_body));
    }
}

#[tokio::test]
async fn test_auth_header_on_every_route_and_method() {
    let mut server = mockito::Server::new_async().await;
    let get_mock = server
        .mock("GET", "/v2/whoami")
        .match_header(AUTH_HEADER, "abc123")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let post_mock = server
        .mock("POST", "/v2/models/train")
        .match_header(AUTH_HEADER, "abc123")
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server)).unwrap();
    client.send(Method::GET, "whoami", None, None, None).await.unwrap();
    client.send(Method::POST, "models/train", Some(&json!({})), None, None).await.unwrap();

    get_mock.assert_async().await;
    post_mock.assert_async().await;
}

#[tokio::test]
async fn test_org_header_attached_when_configured() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/whoami")
        .match_header(ORG_HEADER, "acme")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let config = ClientConfig { org: Some("acme".to_string()), ..config_for(&server) };
    let client = ApiClient::new(config).unwrap();
    client.send(Method::GET, "whoami", None, None, None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_makes_exactly_one_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/whoami")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server)).unwrap();
    let _ = client.send(Method::GET, "whoami", None, None, None).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_retries_up_to_the_attempt_budget() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/whoami")
        .with_status(500)
        .with_body("still down")
        .expect(3)
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server))
        .unwrap()
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(10)).unwrap());
    let err = client.request(Method::GET, "whoami", None, None).await.unwrap_err();

    assert!(err.to_string().contains("still down"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/models/status/demo")
        .match_query(mockito::Matcher::UrlEncoded("allow_demo".into(), "true".into()))
        .with_status(200)
        .with_body(r#"{"status":"pending"}"#)
        .create_async()
        .await;

    let client = fail_fast(ApiClient::new(config_for(&server)).unwrap());
    client
        .send(Method::GET, "models/status/demo", None, Some(&[("allow_demo", "true")]), None)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_success_body_propagates_parse_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/whoami")
        .with_status(200)
        .with_body("this is not json")
        .create_async()
        .await;

    let client = fail_fast(ApiClient::new(config_for(&server)).unwrap());
    let err = client.send(Method::GET, "whoami", None, None, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_send_raw_returns_the_open_response() {
    let mut server = mockito::Server::new_async().await;
    let archive = vec![0x1f, 0x8b, 0x08, 0x00, 0x42];
    server
        .mock("GET", "/v2/pretraining/cpt-1/weights")
        .match_header(AUTH_HEADER, "abc123")
        .with_status(200)
        .with_body(&archive)
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server)).unwrap();
    let response =
        client.send_raw(Method::GET, "pretraining/cpt-1/weights", None).await.unwrap();

    assert_eq!(response.bytes().await.unwrap().as_ref(), archive.as_slice());
}

#[tokio::test]
async fn test_send_raw_classifies_failures_like_send() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/pretraining/missing/weights")
        .with_status(404)
        .with_body("no such job")
        .create_async()
        .await;

    let client = ApiClient::new(config_for(&server)).unwrap();
    let err = client.send_raw(Method::GET, "pretraining/missing/weights", None).await.unwrap_err();
    assert!(err.to_string().contains("no such job"));
}
