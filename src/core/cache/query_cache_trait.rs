use futures::future::BoxFuture;

use crate::core::cache::query_key::QueryKey;
use crate::errors::ClientError;

pub trait QueryCache: Send + Sync {
    /// Start refetching the queries registered under `key`.
    ///
    /// The refetch is requested before this returns; the future only drives
    /// it to completion. Keys without a registered query have nothing to
    /// refresh.
    fn refetch(&self, key: &QueryKey) -> BoxFuture<'static, Result<(), ClientError>>;
}
