use async_trait::async_trait;
use http::header::{HeaderMap, HeaderValue, ACCEPT};
use http::StatusCode;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::core::client::api_client_trait::ApiClient;
use crate::errors::ClientError;

/// reqwest-backed `ApiClient`. Adds no retry; the timeout is whatever the
/// config carries.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApiClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(client, config.base_url(), config.token.clone()))
    }

    pub fn new(client: Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        let url = self.url(path);
        debug!(%method, %url, "sending request");

        let mut req = self.client.request(method.clone(), &url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            error!(%method, %url, error = %e, "request failed");
            ClientError::Transport {
                status: None,
                message: e.to_string(),
            }
        })?;

        Self::read_json(resp).await
    }

    async fn read_json(resp: Response) -> Result<Value, ClientError> {
        let status = resp.status();
        let url = resp.url().to_string();
        let text = resp.text().await.map_err(ClientError::from)?;

        if !status.is_success() {
            let message = error_message(status, &text);
            error!(%url, status = status.as_u16(), %message, "request returned error status");
            return Err(ClientError::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Decode(format!("{} (url={})", e, url)))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send(Method::GET, path, None).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.send(Method::PATCH, path, Some(body)).await
    }
}

/// Prefer the server's `message` field, fall back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        })
}
