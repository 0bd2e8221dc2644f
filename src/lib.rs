//! Client for updating discussions on a remote API while keeping a local
//! query cache in sync.

pub mod app_state;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;

pub use crate::app_state::{build_app_state, AppState};
pub use crate::config::ClientConfig;
pub use crate::core::cache::query_cache_trait::QueryCache;
pub use crate::core::cache::query_client::QueryClient;
pub use crate::core::cache::query_key::QueryKey;
pub use crate::core::client::api_client_trait::ApiClient;
pub use crate::core::client::http_api_client::HttpApiClient;
pub use crate::domain::discussion::dto::update_discussion_request::{
    UpdateDiscussionInput, UpdateDiscussionVariables,
};
pub use crate::domain::discussion::model::discussion::Discussion;
pub use crate::domain::discussion::mutation::mutation_config::MutationConfig;
pub use crate::domain::discussion::mutation::mutation_state::MutationState;
pub use crate::domain::discussion::mutation::update_discussion_mutation::{
    use_update_discussion, UpdateDiscussionMutation,
};
pub use crate::domain::discussion::service::get_discussion_service::{get_discussion, query_key_for};
pub use crate::domain::discussion::service::update_discussion_service::update_discussion;
pub use crate::errors::ClientError;
