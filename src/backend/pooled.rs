//! High-level adapter: shared client with connection pooling.
//!
//! # Responsibilities
//! - Build one pooled client at selection time, redirects disabled
//! - Mirror the direct adapter's header filtering, dispatch table and
//!   body/content-type logic so both produce identical observable results
//!
//! # Design Decisions
//! - Body-bearing methods always get an explicit body (empty when none was
//!   set); the pooled client does not default one silently
//! - Pool release happens when the response stream is dropped; pooling
//!   policy itself belongs to the client library, not this crate

use std::time::Duration;

use crate::backend::{has_response_body, Backend, HEADER_CONTENT_TYPE};
use crate::error::{HttpError, HttpResult};
use crate::request::{Method, Request};
use crate::response::{Headers, Response};

pub(crate) struct PooledBackend {
    client: reqwest::blocking::Client,
}

impl PooledBackend {
    /// Construction can fail; the selector falls back to the direct
    /// adapter when it does.
    pub(crate) fn new() -> HttpResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|error| HttpError::Backend(error.to_string()))?;
        Ok(Self { client })
    }
}

impl Backend for PooledBackend {
    fn name(&self) -> &'static str {
        "pooled"
    }

    fn execute(&self, request: &Request) -> HttpResult<Response> {
        let mut builder = self
            .client
            .request(method_of(request.method()), request.url())
            .timeout(Duration::from_millis(request.timeout_ms()));

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if request.method().allows_body() {
            if let Some(body) = request.body() {
                if !request.has_content_type() {
                    builder = builder.header(HEADER_CONTENT_TYPE, request.body_content_type());
                }
                builder = builder.body(body.to_vec());
            } else {
                builder = builder.body(Vec::new());
            }
        }

        let raw = builder
            .send()
            .map_err(|error| HttpError::Transport(error.to_string()))?;

        let status = i32::from(raw.status().as_u16());
        let headers = collect_headers(raw.headers());

        if !has_response_body(request.method(), status) {
            return Ok(Response::without_body(status, headers));
        }

        let content_length = raw
            .content_length()
            .map(|length| length as i64)
            .unwrap_or(-1);
        // The blocking response reads the body lazily and returns its
        // connection to the pool on drop.
        Ok(Response::with_body(
            status,
            headers,
            content_length,
            Box::new(raw),
        ))
    }
}

fn method_of(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Trace => reqwest::Method::TRACE,
        Method::Patch => reqwest::Method::PATCH,
    }
}

fn collect_headers(map: &reqwest::header::HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in map {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    headers
}
