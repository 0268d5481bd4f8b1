use crate::rest::apis::error_message::ErrorMessage;
use reqwest::StatusCode;
use std::fmt;

pub mod error_message;

/// A registry response that the calling operation could not accept.
#[derive(Debug, Clone)]
pub struct ResponseContent {
    pub status: StatusCode,
    pub content: String,
    pub entity: Option<ErrorMessage>,
}

impl ResponseContent {
    pub fn new(status: StatusCode, content: String) -> ResponseContent {
        let entity = serde_json::from_str::<ErrorMessage>(&content)
            .ok()
            .filter(|e| e.error_code.is_some() || e.message.is_some());
        ResponseContent {
            status,
            content,
            entity,
        }
    }
}

impl fmt::Display for ResponseContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            Some(entity) => write!(f, "{}: {}", self.status, entity),
            None => write!(f, "{}: {}", self.status, self.content),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    #[error("invalid registry url: {0}")]
    Url(#[from] url::ParseError),
    #[error("json serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unexpected response ({status}) from {url}: {content}")]
    Decode {
        status: StatusCode,
        url: String,
        content: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("registry error {0}")]
    ResponseError(ResponseContent),
    #[error("unexpected response {0}")]
    UnexpectedResponse(ResponseContent),
    #[error("invalid version: {0}")]
    InvalidVersion(String),
    #[error("invalid compatibility level: {0}")]
    InvalidCompatibility(String),
}

impl Error {
    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Reqwest(e) => e.status(),
            Error::Decode { status, .. } => Some(*status),
            Error::ResponseError(rc) | Error::UnexpectedResponse(rc) => Some(rc.status),
            _ => None,
        }
    }

    /// Registry error code from the error envelope, if the server sent one.
    pub fn error_code(&self) -> Option<i32> {
        match self {
            Error::ResponseError(rc) | Error::UnexpectedResponse(rc) => {
                rc.entity.as_ref().and_then(|e| e.error_code)
            }
            _ => None,
        }
    }
}
