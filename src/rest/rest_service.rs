use crate::rest::apis::{Error, ResponseContent};
use crate::rest::transport::Transport;
use log::debug;
use reqwest::{Request, StatusCode};
use serde::de::DeserializeOwned;

/// Sends requests through a [`Transport`] and reads back the raw response.
#[derive(Debug, Clone)]
pub struct RestService<T> {
    base_url: String,
    transport: T,
}

/// Status and body of an executed request.
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: StatusCode,
    pub url: String,
    pub content: String,
}

impl<T: Transport> RestService<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        RestService {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes `request` and reads the whole body.
    ///
    /// Transport failures are returned as they are. The status code is not
    /// interpreted here.
    pub async fn execute(&self, request: Request) -> Result<RestResponse, Error> {
        let method = request.method().clone();
        let url = request.url().to_string();
        debug!("{} {}", method, url);

        let resp = self.transport.send(request).await?;
        let status = resp.status();
        debug!("Status: {}", status);
        debug!("Header: {:?}", resp.headers());
        let content = resp.text().await?;
        debug!("Body: {}", content);

        Ok(RestResponse {
            status,
            url,
            content,
        })
    }
}

impl RestResponse {
    /// Decodes the body, or `None` when the body is empty.
    pub fn decode<R: DeserializeOwned>(&self) -> Result<Option<R>, Error> {
        if self.content.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.content)
            .map(Some)
            .map_err(|source| Error::Decode {
                status: self.status,
                url: self.url.clone(),
                content: self.content.clone(),
                source,
            })
    }

    /// Like [`decode`](Self::decode), but an empty body is a contract violation.
    pub fn decode_required<R: DeserializeOwned>(&self) -> Result<R, Error> {
        self.decode()?.ok_or_else(|| self.unexpected())
    }

    /// Fails with the registry's error envelope unless the status is 2xx.
    pub fn error_for_status(&self) -> Result<&Self, Error> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::ResponseError(self.to_response_content()))
        }
    }

    /// Fails unless the status is exactly `expected`.
    pub fn require_status(&self, expected: StatusCode) -> Result<&Self, Error> {
        self.error_for_status()?;
        if self.status == expected {
            Ok(self)
        } else {
            Err(self.unexpected())
        }
    }

    /// A successful response whose payload cannot be right.
    pub fn unexpected(&self) -> Error {
        Error::UnexpectedResponse(self.to_response_content())
    }

    pub fn to_response_content(&self) -> ResponseContent {
        ResponseContent::new(self.status, self.content.clone())
    }
}
