//! Request model: an immutable description of a single HTTP call.
//!
//! # Responsibilities
//! - Hold URL, method, headers, optional body and timeout
//! - Validate the header mapping and method/body compatibility before the
//!   value becomes usable
//! - Derive the body content type from the request variant
//!
//! # Design Decisions
//! - Requests are immutable once built; mutation happens only on the builder
//! - Header validation is eager (at `build()`); URL validity is checked at
//!   execution time, so a malformed URL builds fine but fails when executed

use crate::error::{HttpError, HttpResult};

/// Default connect/read timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// The transport method string.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }

    /// Whether this method may carry a request body.
    pub fn allows_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request variant, which determines the default body content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEncoding {
    Form,
    Json,
}

impl BodyEncoding {
    fn content_type(self) -> &'static str {
        match self {
            BodyEncoding::Form => "application/x-www-form-urlencoded; charset=UTF-8",
            BodyEncoding::Json => "application/json; charset=utf-8",
        }
    }
}

/// An immutable, validated HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout_ms: u64,
    encoding: BodyEncoding,
}

impl Request {
    /// Start building a plain request (form-encoded default body type).
    pub fn builder(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url.into(), BodyEncoding::Form)
    }

    /// Start building a JSON request (`application/json` body type).
    pub fn json(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url.into(), BodyEncoding::Json)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value for `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Timeout applied to both the connect and read phases.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Content type used when a body is written and the caller did not
    /// supply a `Content-Type` header.
    pub fn body_content_type(&self) -> &'static str {
        self.encoding.content_type()
    }

    pub(crate) fn has_content_type(&self) -> bool {
        self.header(HEADER_CONTENT_TYPE).is_some()
    }
}

/// Validating builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout_ms: u64,
    encoding: BodyEncoding,
}

impl RequestBuilder {
    fn new(url: String, encoding: BodyEncoding) -> Self {
        Self {
            url,
            method: Method::Get,
            headers: Vec::new(),
            body: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            encoding,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a single header. Repeated names are kept in order.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a whole header mapping.
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Validate and produce the immutable request.
    ///
    /// Rejects empty header names and a body on a method that carries none.
    /// URL validity is deliberately not checked here.
    pub fn build(self) -> HttpResult<Request> {
        for (name, _) in &self.headers {
            if name.is_empty() {
                return Err(HttpError::Header("empty header name".to_string()));
            }
        }
        if self.body.is_some() && !self.method.allows_body() {
            return Err(HttpError::Body(format!(
                "{} requests carry no body",
                self.method
            )));
        }
        Ok(Request {
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: self.body,
            timeout_ms: self.timeout_ms,
            encoding: self.encoding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = Request::builder("http://example.com").build().unwrap();
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.timeout_ms(), DEFAULT_TIMEOUT_MS);
        assert!(request.headers().is_empty());
        assert!(request.body().is_none());
        assert_eq!(
            request.body_content_type(),
            "application/x-www-form-urlencoded; charset=UTF-8"
        );
    }

    #[test]
    fn test_json_variant_content_type() {
        let request = Request::json("http://example.com")
            .method(Method::Post)
            .body("{}")
            .build()
            .unwrap();
        assert_eq!(request.body_content_type(), "application/json; charset=utf-8");
    }

    #[test]
    fn test_empty_header_name_rejected() {
        let result = Request::builder("http://example.com")
            .header("", "value")
            .build();
        assert!(matches!(result, Err(HttpError::Header(_))));
    }

    #[test]
    fn test_headers_retrievable_unchanged() {
        let request = Request::builder("http://example.com")
            .header("X-One", "1")
            .header("X-Two", "")
            .build()
            .unwrap();
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.header("x-one"), Some("1"));
        // Empty values are allowed.
        assert_eq!(request.header("X-Two"), Some(""));
    }

    #[test]
    fn test_body_on_bodyless_method_rejected() {
        for method in [
            Method::Get,
            Method::Head,
            Method::Options,
            Method::Trace,
            Method::Delete,
        ] {
            let result = Request::builder("http://example.com")
                .method(method)
                .body("data")
                .build();
            assert!(matches!(result, Err(HttpError::Body(_))), "{method}");
        }
    }

    #[test]
    fn test_body_allowed_for_write_methods() {
        for method in [Method::Post, Method::Put, Method::Patch] {
            let request = Request::builder("http://example.com")
                .method(method)
                .body("a=1")
                .build()
                .unwrap();
            assert_eq!(request.body(), Some(&b"a=1"[..]));
        }
    }

    #[test]
    fn test_caller_content_type_detected() {
        let request = Request::builder("http://example.com")
            .method(Method::Post)
            .header("content-type", "text/plain")
            .body("x")
            .build()
            .unwrap();
        assert!(request.has_content_type());
    }
}
