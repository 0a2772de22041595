//! The request dispatcher.
//!
//! [`ApiClient`] is the single chokepoint for talking to the platform: it
//! resolves the target URL from the configured base and version, attaches
//! authentication, serializes the body, sends the request, and classifies
//! the outcome by status code. Success is exactly {200, 201, 202}; anything
//! else surfaces as [`ClientError::Api`] carrying the raw response text.
//!
//! [`ApiClient::request`] wraps the single-attempt [`ApiClient::send`] in
//! the client's retry policy. Callers wanting fail-fast semantics use
//! `send` directly. The streaming [`ApiClient::send_raw`] shares the same
//! auth and URL logic but hands back the open response, so large binary
//! bodies (weight archives) can be read incrementally; it is never retried.

use crate::config::{API_KEY_VAR, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::retry::RetryPolicy;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, error};

/// Custom token header carrying the API key on every request.
pub const AUTH_HEADER: &str = "x-token";
/// Organization header, attached when an org is configured.
pub const ORG_HEADER: &str = "x-kiln-org";

/// Status codes treated as success.
const ACCEPTED_STATUS: [u16; 3] = [200, 201, 202];

/// Authenticated HTTP client for the platform API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    default_headers: HeaderMap,
    retry: RetryPolicy,
    http: Client,
}

impl ApiClient {
    /// Create a client from a resolved configuration.
    ///
    /// Fails with a configuration error if the API key is missing or not a
    /// valid header value. Every outbound request must carry it, so the
    /// absence is caught here, before any network activity.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        if config.api_key.is_empty() {
            return Err(ClientError::Config(format!(
                "{} is not set. Retrieve your API key from {}",
                API_KEY_VAR, config.app_url
            )));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let token = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ClientError::Config("API key is not a valid header value".to_string()))?;
        default_headers.insert(AUTH_HEADER, token);
        if let Some(ref org) = config.org {
            let org = HeaderValue::from_str(org).map_err(|_| {
                ClientError::Config("Organization is not a valid header value".to_string())
            })?;
            default_headers.insert(ORG_HEADER, org);
        }

        Ok(Self { config, default_headers, retry: RetryPolicy::default(), http: Client::new() })
    }

    /// Replace the retry policy used by [`ApiClient::request`].
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The resolved configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL for a resolved route path.
    fn url_for(&self, path: &str) -> String {
        format!("{}/{}/{}", self.config.api_url, self.config.api_version, path)
    }

    /// Headers for one request: caller extras merged under the defaults.
    ///
    /// Content type and authentication are not overridable; they are
    /// applied after the extras.
    fn headers_with(&self, extra: Option<&HeaderMap>) -> HeaderMap {
        let mut headers = extra.cloned().unwrap_or_default();
        for (name, value) in &self.default_headers {
            headers.insert(name, value.clone());
        }
        headers
    }

    /// Perform one authenticated call and classify the outcome.
    ///
    /// Exactly one network call per invocation; no retries. The body is
    /// parsed as JSON on success; a non-JSON success body is a contract
    /// violation by the platform and propagates as a transport error.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&[(&str, &str)]>,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<Value> {
        let url = self.url_for(path);
        debug!(method = %method, url = %url, "dispatching request");

        let mut request = self.http.request(method, &url).headers(self.headers_with(extra_headers));
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if !ACCEPTED_STATUS.contains(&status) {
            let body = response.text().await.unwrap_or_default();
            error!(status, url = %url, "request failed");
            return Err(ClientError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// [`ApiClient::send`] wrapped in this client's retry policy.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&[(&str, &str)]>,
    ) -> ClientResult<Value> {
        self.retry.run(|| self.send(method.clone(), path, body, query, None)).await
    }

    /// Streaming variant: same auth, URL resolution, and status
    /// classification, but returns the open response for incremental
    /// consumption. Never retried.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
    ) -> ClientResult<Response> {
        let url = self.url_for(path);
        debug!(method = %method, url = %url, "dispatching streaming request");

        let mut request = self.http.request(method, &url).headers(self.headers_with(None));
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if !ACCEPTED_STATUS.contains(&status) {
            let body = response.text().await.unwrap_or_default();
            error!(status, url = %url, "streaming request failed");
            return Err(ClientError::Api { status, body });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_url: &str) -> ClientConfig {
        ClientConfig {
            api_key: "abc123".to_string(),
            api_url: api_url.to_string(),
            app_url: "https://app.kiln.test".to_string(),
            org: None,
            api_version: "v2".to_string(),
        }
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let config = ClientConfig {
            api_key: String::new(),
            ..test_config("https://api.kiln.test")
        };
        let err = ApiClient::new(config).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_url_joins_base_version_and_path() {
        let client = ApiClient::new(test_config("https://api.kiln.test")).unwrap();
        assert_eq!(client.url_for("contexts"), "https://api.kiln.test/v2/contexts");
    }

    #[test]
    fn test_default_headers_are_not_overridable() {
        let client = ApiClient::new(test_config("https://api.kiln.test")).unwrap();

        let mut extra = HeaderMap::new();
        extra.insert(AUTH_HEADER, HeaderValue::from_static("spoofed"));
        extra.insert("x-request-id", HeaderValue::from_static("req-1"));

        let merged = client.headers_with(Some(&extra));
        assert_eq!(merged.get(AUTH_HEADER).unwrap(), "abc123");
        assert_eq!(merged.get("x-request-id").unwrap(), "req-1");
        assert_eq!(merged.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_org_header_only_when_configured() {
        let client = ApiClient::new(test_config("https://api.kiln.test")).unwrap();
        assert!(client.headers_with(None).get(ORG_HEADER).is_none());

        let config = ClientConfig { org: Some("acme".to_string()), ..test_config("x") };
        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.headers_with(None).get(ORG_HEADER).unwrap(), "acme");
    }
}
