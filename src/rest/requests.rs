//! One request constructor per registry endpoint.
//!
//! Every call derives a new [`Request`] from the base address; nothing is
//! shared or mutated between calls.

use crate::rest::apis::Error;
use crate::rest::models::{SchemaId, SchemaPayload, ServerConfig, Subject, Version};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Body, Method, Request};
use serde::Serialize;
use url::Url;

pub const ACCEPT_MEDIA_TYPES: &str =
    "application/vnd.schemaregistry.v1+json,application/vnd.schemaregistry+json,application/json";
pub const CONTENT_MEDIA_TYPE: &str = "application/vnd.schemaregistry.v1+json";

/// Joins `segments` onto the path of `base_url`.
///
/// Segments are literal path components; empty components are dropped and
/// embedded `/` are kept as separators.
pub fn build_url(base_url: &str, segments: &[&str]) -> Result<Url, Error> {
    let mut url = Url::parse(base_url)?;
    let components: Vec<&str> = url
        .path()
        .split('/')
        .chain(segments.iter().flat_map(|s| s.split('/')))
        .filter(|c| !c.is_empty())
        .collect();
    let path = format!("/{}", components.join("/"));
    url.set_path(&path);
    Ok(url)
}

/// POST /subjects/{subject}/versions
pub fn register(base_url: &str, subject: &Subject, body: &SchemaPayload) -> Result<Request, Error> {
    with_body(
        base_url,
        Method::POST,
        &["subjects", subject.as_str(), "versions"],
        body,
    )
}

/// GET /schemas/ids/{id}
pub fn get_schema(base_url: &str, id: SchemaId) -> Result<Request, Error> {
    without_body(base_url, Method::GET, &["schemas", "ids", &id.to_string()])
}

/// GET /subjects/{subject}/versions/{version}
pub fn get_version(base_url: &str, subject: &Subject, version: &Version) -> Result<Request, Error> {
    without_body(
        base_url,
        Method::GET,
        &["subjects", subject.as_str(), "versions", &version.to_string()],
    )
}

/// POST /subjects/{subject}
pub fn has_schema(base_url: &str, subject: &Subject, body: &SchemaPayload) -> Result<Request, Error> {
    with_body(base_url, Method::POST, &["subjects", subject.as_str()], body)
}

/// POST /compatibility/subjects/{subject}/versions/{version}
pub fn check_compatibility(
    base_url: &str,
    subject: &Subject,
    version: &Version,
    body: &SchemaPayload,
) -> Result<Request, Error> {
    with_body(
        base_url,
        Method::POST,
        &[
            "compatibility",
            "subjects",
            subject.as_str(),
            "versions",
            &version.to_string(),
        ],
        body,
    )
}

/// GET /subjects
pub fn list_subjects(base_url: &str) -> Result<Request, Error> {
    without_body(base_url, Method::GET, &["subjects"])
}

/// GET /subjects/{subject}/versions
pub fn list_versions(base_url: &str, subject: &Subject) -> Result<Request, Error> {
    without_body(
        base_url,
        Method::GET,
        &["subjects", subject.as_str(), "versions"],
    )
}

/// GET /config
pub fn get_config(base_url: &str) -> Result<Request, Error> {
    without_body(base_url, Method::GET, &["config"])
}

/// GET /config/{subject}
pub fn get_subject_config(base_url: &str, subject: &Subject) -> Result<Request, Error> {
    without_body(base_url, Method::GET, &["config", subject.as_str()])
}

/// PUT /config/{subject}
pub fn put_subject_config(
    base_url: &str,
    subject: &Subject,
    body: &ServerConfig,
) -> Result<Request, Error> {
    with_body(base_url, Method::PUT, &["config", subject.as_str()], body)
}

fn without_body(base_url: &str, method: Method, segments: &[&str]) -> Result<Request, Error> {
    let url = build_url(base_url, segments)?;
    let mut request = Request::new(method, url);
    request
        .headers_mut()
        .insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPES));
    Ok(request)
}

fn with_body<B: Serialize>(
    base_url: &str,
    method: Method,
    segments: &[&str],
    body: &B,
) -> Result<Request, Error> {
    // Marshal first so a bad body never reaches the transport.
    let body = serde_json::to_vec(body)?;
    let mut request = without_body(base_url, method, segments)?;
    request
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_MEDIA_TYPE));
    *request.body_mut() = Some(Body::from(body));
    Ok(request)
}
