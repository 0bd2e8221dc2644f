use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Validation failed: {}", format_fields(.fields))]
    Validation {
        fields: BTreeMap<String, Vec<String>>,
    },

    #[error("Request failed{}: {message}", format_status(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Mutation hook {hook} panicked: {message}")]
    Hook { hook: String, message: String },

    #[error("Failed to refetch query {key}: {message}")]
    CacheRefresh { key: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Single-field validation failure.
    pub fn required(field: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec!["Required".to_string()]);
        ClientError::Validation { fields }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }

    /// Messages recorded for `field`, empty when the field passed.
    pub fn field_messages(&self, field: &str) -> &[String] {
        match self {
            ClientError::Validation { fields } => {
                fields.get(field).map(Vec::as_slice).unwrap_or(&[])
            }
            _ => &[],
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        ClientError::Validation { fields }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ClientError::Decode(err.to_string());
        }
        ClientError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn format_fields(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {}", code),
        None => String::new(),
    }
}
