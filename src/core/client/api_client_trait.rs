use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClientError;

/// JSON transport for the discussions API. Paths are relative to the
/// configured base URL and start with `/`.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, ClientError>;

    /// Any non-2xx status surfaces as `ClientError::Transport`.
    async fn patch(&self, path: &str, body: Value) -> Result<Value, ClientError>;
}
