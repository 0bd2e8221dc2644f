use std::sync::Arc;

use tracing::info;

use crate::config::ClientConfig;
use crate::core::cache::query_client::QueryClient;
use crate::core::client::api_client_trait::ApiClient;
use crate::core::client::http_api_client::HttpApiClient;
use crate::domain::discussion::dto::update_discussion_request::UpdateDiscussionInput;
use crate::domain::discussion::model::discussion::Discussion;
use crate::domain::discussion::mutation::mutation_config::MutationConfig;
use crate::domain::discussion::mutation::update_discussion_mutation::{
    use_update_discussion, UpdateDiscussionMutation,
};
use crate::domain::discussion::service::get_discussion_service::discussion_query;
use crate::domain::discussion::service::update_discussion_service;
use crate::errors::ClientError;

/// Shared API client and query cache handed to UI code.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ApiClient>,
    pub query_client: Arc<QueryClient>,
}

pub fn build_app_state(config: &ClientConfig) -> Result<AppState, ClientError> {
    let api = HttpApiClient::from_config(config)?;
    info!(api_url = %config.base_url(), "discussion client ready");

    Ok(AppState::new(Arc::new(api), QueryClient::new().shared()))
}

impl AppState {
    pub fn new(api: Arc<dyn ApiClient>, query_client: Arc<QueryClient>) -> Self {
        Self { api, query_client }
    }

    /// Load a discussion through the cache so later updates refresh it.
    pub async fn get_discussion(&self, discussion_id: &str) -> Result<Discussion, ClientError> {
        let (key, fetcher) = discussion_query(self.api.clone(), discussion_id);
        let data = self.query_client.fetch_query(key, fetcher).await?;
        serde_json::from_value(data).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Bare update without cache side effects.
    pub async fn update_discussion(
        &self,
        discussion_id: &str,
        data: &UpdateDiscussionInput,
    ) -> Result<Discussion, ClientError> {
        update_discussion_service::update_discussion(self.api.as_ref(), discussion_id, data).await
    }

    pub fn use_update_discussion(&self, config: MutationConfig) -> UpdateDiscussionMutation {
        use_update_discussion(self.api.clone(), self.query_client.clone(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::domain::discussion::dto::update_discussion_request::UpdateDiscussionVariables;
    use crate::domain::discussion::service::get_discussion_service::query_key_for;

    type Store = Arc<Mutex<Value>>;

    async fn spawn_discussions_api() -> String {
        async fn read(State(store): State<Store>, Path(id): Path<String>) -> Json<Value> {
            let mut record = store.lock().unwrap().clone();
            record["id"] = json!(id);
            Json(record)
        }

        async fn write(
            State(store): State<Store>,
            Path(id): Path<String>,
            Json(body): Json<Value>,
        ) -> Json<Value> {
            let mut record = store.lock().unwrap();
            record["title"] = body["title"].clone();
            record["body"] = body["body"].clone();
            record["id"] = json!(id);
            Json(record.clone())
        }

        let store: Store = Arc::new(Mutex::new(json!({
            "title": "Original",
            "body": "Text",
            "teamId": "team-1"
        })));

        let app = Router::new()
            .route("/api/discussions/{id}", get(read).patch(write))
            .with_state(store);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    #[tokio::test]
    async fn update_refreshes_cached_discussion() {
        let base = spawn_discussions_api().await;
        let state = build_app_state(&ClientConfig::new(base)).unwrap();

        let before = state.get_discussion("42").await.unwrap();
        assert_eq!(before.title(), Some("Original"));

        let mutation = state.use_update_discussion(MutationConfig::new().await_refresh(true));
        let updated = mutation
            .mutate(UpdateDiscussionVariables::new(
                "42",
                UpdateDiscussionInput::new("Hi", "There"),
            ))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&updated).unwrap(),
            json!({ "id": "42", "title": "Hi", "body": "There", "teamId": "team-1" })
        );

        let cached = state.query_client.get_query_data(&query_key_for("42")).unwrap();
        assert_eq!(cached["title"], "Hi");
        assert_eq!(cached["body"], "There");
    }

    #[tokio::test]
    async fn bare_update_leaves_cache_alone() {
        let base = spawn_discussions_api().await;
        let state = build_app_state(&ClientConfig::new(base)).unwrap();
        state.get_discussion("7").await.unwrap();

        state
            .update_discussion("7", &UpdateDiscussionInput::new("Changed", "Body"))
            .await
            .unwrap();

        let cached = state.query_client.get_query_data(&query_key_for("7")).unwrap();
        assert_eq!(cached["title"], "Original");
    }
}
