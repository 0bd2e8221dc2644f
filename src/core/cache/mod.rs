pub mod query_cache_trait;
pub mod query_client;
pub mod query_key;
