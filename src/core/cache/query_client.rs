use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::{self, join_all, BoxFuture};
use futures::FutureExt;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::core::cache::query_cache_trait::QueryCache;
use crate::core::cache::query_key::QueryKey;
use crate::errors::ClientError;

/// Produces fresh data for one query.
pub type QueryFn = Arc<dyn Fn() -> BoxFuture<'static, Result<Value>> + Send + Sync>;

#[derive(Clone, Default)]
pub struct QueryEntry {
    pub data: Option<Value>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Completed runs of the registered fetcher; `set_query_data` does not count
    pub fetch_count: u32,
    fetcher: Option<QueryFn>,
}

#[derive(Clone, Default)]
struct QueryState {
    entries: HashMap<QueryKey, QueryEntry>,
}

/// In-memory query cache keyed by `QueryKey`.
///
/// The lock is only held to snapshot or swap the state, never while a
/// fetcher runs; when two fetches for one key race, the one that finishes
/// last wins.
#[derive(Clone, Default)]
pub struct QueryClient {
    state: Arc<RwLock<Arc<QueryState>>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Register `fetcher` under `key`, run it and cache the result.
    pub async fn fetch_query(&self, key: QueryKey, fetcher: QueryFn) -> Result<Value, ClientError> {
        self.update(|state| {
            state.entries.entry(key.clone()).or_default().fetcher = Some(fetcher.clone());
        });

        let data = fetcher().await.map_err(|e| ClientError::CacheRefresh {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.store(&key, data.clone(), true);
        Ok(data)
    }

    pub fn get_query_data(&self, key: &QueryKey) -> Option<Value> {
        self.snapshot().entries.get(key).and_then(|e| e.data.clone())
    }

    pub fn set_query_data(&self, key: QueryKey, data: Value) {
        self.store(&key, data, false);
    }

    pub fn entry(&self, key: &QueryKey) -> Option<QueryEntry> {
        self.snapshot().entries.get(key).cloned()
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn remove_queries(&self, prefix: &QueryKey) {
        self.update(|state| state.entries.retain(|k, _| !k.starts_with(prefix)));
    }

    fn snapshot(&self) -> Arc<QueryState> {
        self.state.read().clone()
    }

    fn store(&self, key: &QueryKey, data: Value, fetched: bool) {
        self.update(|state| {
            let entry = state.entries.entry(key.clone()).or_default();
            entry.data = Some(data);
            entry.updated_at = Some(Utc::now());
            if fetched {
                entry.fetch_count += 1;
            }
        });
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut QueryState),
    {
        let mut guard = self.state.write();
        let mut next = (**guard).clone();
        f(&mut next);
        *guard = Arc::new(next);
    }
}

impl QueryCache for QueryClient {
    /// Starts every registered query whose key starts with `key`.
    fn refetch(&self, key: &QueryKey) -> BoxFuture<'static, Result<(), ClientError>> {
        let in_flight: Vec<(QueryKey, BoxFuture<'static, Result<Value>>)> = self
            .snapshot()
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(key))
            .filter_map(|(k, e)| e.fetcher.as_ref().map(|fetcher| (k.clone(), fetcher())))
            .collect();

        if in_flight.is_empty() {
            debug!(%key, "no registered query to refetch");
            return future::ready(Ok(())).boxed();
        }

        let client = self.clone();
        async move {
            let results = join_all(
                in_flight
                    .into_iter()
                    .map(|(k, fetch)| async move { (k, fetch.await) }),
            )
            .await;

            let mut first_error = None;
            for (k, outcome) in results {
                match outcome {
                    Ok(data) => {
                        debug!(key = %k, "query refetched");
                        client.store(&k, data, true);
                    }
                    Err(e) => {
                        if first_error.is_none() {
                            first_error = Some(ClientError::CacheRefresh {
                                key: k.to_string(),
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }

            match first_error {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
        .boxed()
    }
}
