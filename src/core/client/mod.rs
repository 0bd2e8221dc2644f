pub mod api_client_trait;
pub mod http_api_client;
