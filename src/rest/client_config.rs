use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the registry, e.g. `http://localhost:8081`
    pub base_url: String,

    /// Transport used by [`SchemaRegistryClient::new`](crate::rest::schema_registry_client::SchemaRegistryClient::new).
    /// Timeouts, TLS and proxies are configured here.
    pub client: reqwest::Client,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> ClientConfig {
        ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        }
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<ClientConfig, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(ClientConfig {
            base_url: base_url.into(),
            client,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8081".to_owned(),
            client: reqwest::Client::new(),
        }
    }
}
