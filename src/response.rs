//! Response model: the backend-neutral result of an execution.
//!
//! # Responsibilities
//! - Carry status code, headers and content length
//! - Hold the lazily-consumed body stream, if the status implies one
//! - Provide a scoped, single-read body wrapper
//!
//! # Design Decisions
//! - The content stream owns the underlying transport handle; dropping the
//!   stream is what releases the connection, on every exit path
//! - `body()` moves the stream out of the response, so it can only be
//!   consumed once; a second call yields an empty body

use std::collections::HashMap;
use std::io::{Cursor, Read};

use crate::error::HttpResult;

/// Status code used when no status could be produced by a backend.
pub const STATUS_UNAVAILABLE: i32 = -1;

/// Response headers: name to values, repeated headers kept in order.
pub type Headers = HashMap<String, Vec<String>>;

/// A normalized HTTP response.
pub struct Response {
    status: i32,
    headers: Headers,
    content_length: i64,
    content: Option<Box<dyn Read + Send>>,
}

impl Response {
    /// A response whose status implies no body. The transport connection
    /// must already be released by the caller.
    pub(crate) fn without_body(status: i32, headers: Headers) -> Self {
        Self {
            status,
            headers,
            content_length: -1,
            content: None,
        }
    }

    /// A response with a live body stream bound to its transport connection.
    pub(crate) fn with_body(
        status: i32,
        headers: Headers,
        content_length: i64,
        content: Box<dyn Read + Send>,
    ) -> Self {
        Self {
            status,
            headers,
            content_length,
            content: Some(content),
        }
    }

    /// A synthetic failure response carrying the rendered error text as body.
    pub(crate) fn failure(text: String) -> Self {
        let bytes = text.into_bytes();
        Self {
            status: STATUS_UNAVAILABLE,
            headers: Headers::new(),
            content_length: bytes.len() as i64,
            content: Some(Box::new(Cursor::new(bytes))),
        }
    }

    /// The HTTP status code, or [`STATUS_UNAVAILABLE`] for a synthesized
    /// failure.
    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// Declared content length, or -1 when unknown or not applicable.
    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    /// Take the body out of the response as a scoped, single-read wrapper.
    pub fn body(&mut self) -> ResponseBody {
        ResponseBody {
            content: self.content.take(),
        }
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .field("content", &self.content.as_ref().map(|_| "<stream>"))
            .finish()
    }
}

/// Scoped reader for a response body.
///
/// Each accessor fully drains the stream and releases the underlying
/// connection exactly once, or returns an empty result if no body existed.
pub struct ResponseBody {
    content: Option<Box<dyn Read + Send>>,
}

impl ResponseBody {
    /// Drain the stream and decode it as UTF-8, replacing invalid sequences.
    pub fn string(self) -> HttpResult<String> {
        let bytes = self.bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Drain the stream into raw bytes.
    pub fn bytes(self) -> HttpResult<Vec<u8>> {
        let mut buffer = Vec::new();
        if let Some(mut content) = self.content {
            content.read_to_end(&mut buffer)?;
            // content dropped here, releasing the transport connection
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_body_reads_empty() {
        let mut response = Response::without_body(204, Headers::new());
        assert_eq!(response.body().string().unwrap(), "");
        let mut response = Response::without_body(204, Headers::new());
        assert!(response.body().bytes().unwrap().is_empty());
    }

    #[test]
    fn test_body_is_single_read() {
        let mut response = Response::with_body(
            200,
            Headers::new(),
            2,
            Box::new(Cursor::new(b"ok".to_vec())),
        );
        assert_eq!(response.body().string().unwrap(), "ok");
        assert_eq!(response.body().string().unwrap(), "");
    }

    #[test]
    fn test_failure_response_shape() {
        let mut response = Response::failure("connect refused".to_string());
        assert_eq!(response.status(), STATUS_UNAVAILABLE);
        assert!(response.headers().is_empty());
        assert_eq!(response.content_length(), 15);
        assert_eq!(response.body().string().unwrap(), "connect refused");
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("X-Test".to_string(), vec!["1".to_string(), "2".to_string()]);
        let response = Response::without_body(200, headers);
        assert_eq!(response.header("x-test"), Some("1"));
        assert_eq!(response.header("missing"), None);
    }

    #[test]
    fn test_lossy_utf8_decoding() {
        let mut response = Response::with_body(
            200,
            Headers::new(),
            3,
            Box::new(Cursor::new(vec![b'a', 0xff, b'b'])),
        );
        let text = response.body().string().unwrap();
        assert_eq!(text.chars().count(), 3);
        assert!(text.starts_with('a') && text.ends_with('b'));
    }
}
