use crate::rest::apis::Error;
use reqwest::{Request, Response};

/// Executes a fully formed request against the registry.
///
/// This is the only seam between the client and the HTTP stack. Retries,
/// timeouts and TLS are the transport's business.
#[trait_variant::make(Send)]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<Response, Error>;
}

impl Transport for reqwest::Client {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        Ok(self.execute(request).await?)
    }
}
