pub mod apis;
pub mod client_config;
pub mod mock_schema_registry_client;
pub mod models;
pub mod requests;
pub mod rest_service;
pub mod schema_registry_client;
#[cfg(test)]
pub(crate) mod stub_transport;
pub mod transport;
