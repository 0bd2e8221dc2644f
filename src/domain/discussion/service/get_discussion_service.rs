use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;

use crate::core::cache::query_client::QueryFn;
use crate::core::cache::query_key::QueryKey;
use crate::core::client::api_client_trait::ApiClient;
use crate::domain::discussion::model::discussion::Discussion;
use crate::domain::discussion::service::discussion_path;
use crate::errors::ClientError;

pub const DISCUSSIONS_KEY: &str = "discussions";

/// Cache key of a single discussion.
pub fn query_key_for(discussion_id: &str) -> QueryKey {
    QueryKey::new([DISCUSSIONS_KEY, discussion_id])
}

pub async fn get_discussion<A: ApiClient + ?Sized>(
    api: &A,
    discussion_id: &str,
) -> Result<Discussion, ClientError> {
    let resp = api.get(&discussion_path(discussion_id)).await?;
    serde_json::from_value(resp).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Key and fetcher for registering one discussion with a `QueryClient`.
pub fn discussion_query(api: Arc<dyn ApiClient>, discussion_id: &str) -> (QueryKey, QueryFn) {
    let key = query_key_for(discussion_id);
    let id = discussion_id.to_string();

    let fetcher: QueryFn = Arc::new(move || {
        let api = api.clone();
        let id = id.clone();
        async move {
            let discussion = get_discussion(api.as_ref(), &id).await?;
            Ok::<Value, anyhow::Error>(serde_json::to_value(discussion)?)
        }
        .boxed()
    });

    (key, fetcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::core::cache::query_cache_trait::QueryCache;
    use crate::core::cache::query_client::QueryClient;

    #[derive(Default)]
    struct MockApi {
        gets: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ApiClient for MockApi {
        async fn get(&self, path: &str) -> Result<Value, ClientError> {
            let mut gets = self.gets.lock().unwrap();
            gets.push(path.to_string());
            Ok(json!({ "id": "42", "title": format!("v{}", gets.len()), "body": "b" }))
        }

        async fn patch(&self, _path: &str, _body: Value) -> Result<Value, ClientError> {
            unreachable!("reads only")
        }
    }

    #[test]
    fn key_is_discussions_then_id() {
        assert_eq!(query_key_for("42"), QueryKey::new(["discussions", "42"]));
    }

    #[tokio::test]
    async fn discussion_query_fetches_and_refetches() {
        let api = Arc::new(MockApi::default());
        let client = QueryClient::new();
        let (key, fetcher) = discussion_query(api.clone(), "42");

        let first = client.fetch_query(key.clone(), fetcher).await.unwrap();
        assert_eq!(first["title"], "v1");

        client.refetch(&key).await.unwrap();
        let cached = client.get_query_data(&key).unwrap();
        assert_eq!(cached["title"], "v2");
        assert_eq!(
            api.gets.lock().unwrap().clone(),
            vec!["/discussions/42".to_string(), "/discussions/42".to_string()]
        );
    }
}
