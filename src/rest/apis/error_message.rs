use serde::{Deserialize, Serialize};
use std::fmt;

/// ErrorMessage : Error envelope returned by the registry on non-2xx responses
#[derive(Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Error code
    #[serde(rename = "error_code", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
    /// Detailed error message
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorMessage {
    pub fn new(error_code: i32, message: &str) -> ErrorMessage {
        ErrorMessage {
            error_code: Some(error_code),
            message: Some(message.to_string()),
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error_code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{} (error code {})", message, code),
            (None, Some(message)) => write!(f, "{}", message),
            (Some(code), None) => write!(f, "error code {}", code),
            (None, None) => write!(f, "unknown registry error"),
        }
    }
}
