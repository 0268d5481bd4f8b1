use crate::rest::apis::Error;
use crate::rest::transport::Transport;
use reqwest::header::HeaderMap;
use reqwest::{Request, Response};
use std::io;
use std::sync::Mutex;
use url::Url;

/// Canned-response transport that records every request it sees.
///
/// Routes match on method plus either the path or, when the pattern starts
/// with `http`, the full URL without query. Unmatched requests get a 404
/// error envelope.
#[derive(Default)]
pub(crate) struct StubTransport {
    routes: Vec<Route>,
    failures: Vec<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

struct Route {
    method: String,
    pattern: String,
    status: u16,
    body: String,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    pub fn body_str(&self) -> Option<&str> {
        self.body.as_deref().and_then(|b| std::str::from_utf8(b).ok())
    }
}

impl StubTransport {
    pub fn new() -> Self {
        StubTransport::default()
    }

    pub fn route(mut self, method: &str, pattern: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            method: method.to_string(),
            pattern: pattern.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    /// Requests matching `pattern` fail as if the connection was refused.
    pub fn fail_on(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn matches(pattern: &str, url: &Url) -> bool {
        if pattern.starts_with("http") {
            let mut without_query = url.clone();
            without_query.set_query(None);
            without_query.as_str() == pattern
        } else {
            url.path() == pattern
        }
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        let method = request.method().to_string();
        let url = request.url().clone();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            url: url.clone(),
            headers: request.headers().clone(),
            body: request.body().and_then(|b| b.as_bytes()).map(|b| b.to_vec()),
        });

        if self.failures.iter().any(|p| StubTransport::matches(p, &url)) {
            return Err(Error::Transport(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))));
        }

        let (status, body) = self
            .routes
            .iter()
            .find(|r| r.method == method && StubTransport::matches(&r.pattern, &url))
            .map(|r| (r.status, r.body.clone()))
            .unwrap_or_else(|| {
                (
                    404,
                    r#"{"error_code":404,"message":"HTTP 404 Not Found"}"#.to_string(),
                )
            });
        let resp = http::Response::builder()
            .status(status)
            .body(body)
            .map_err(|e| Error::Transport(Box::new(e)))?;
        Ok(Response::from(resp))
    }
}
