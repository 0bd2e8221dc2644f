use serde::Serialize;
use serde_json::Value;

use crate::errors::ClientError;

pub mod get_discussion_service;
pub mod update_discussion_service;

/// `/discussions/{id}` with the id percent-encoded as one path segment.
pub(crate) fn discussion_path(discussion_id: &str) -> String {
    format!("/discussions/{}", urlencoding::encode(discussion_id))
}

/// Serialize an outgoing request body.
pub(crate) fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))
}
