//! Backend adapters: interchangeable implementations of the execute contract.
//!
//! # Data Flow
//! ```text
//! Request
//!     → selected Backend::execute
//!     → raw transport reply
//!     → has_response_body gate (HEAD / 1xx / 204 / 304 have none)
//!     → normalized Response, body stream bound to the connection
//! ```
//!
//! # Design Decisions
//! - Two adapters behind one trait, chosen once at client construction;
//!   callers never observe which one is active
//! - The pooled adapter sits behind the `pooled` cargo feature; if it is
//!   compiled out or fails to construct, selection falls back silently to
//!   the direct adapter

use std::io::{self, BufRead};

use crate::client::ClientOptions;
use crate::error::HttpResult;
use crate::request::{Method, Request};
use crate::response::Response;

pub(crate) mod direct;
#[cfg(feature = "pooled")]
pub(crate) mod pooled;

pub(crate) const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// The execute contract both adapters fulfill.
pub(crate) trait Backend: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Execute the request and normalize the reply into a [`Response`].
    fn execute(&self, request: &Request) -> HttpResult<Response>;
}

/// Choose a backend once for the lifetime of a client.
pub(crate) fn select(options: &ClientOptions) -> Box<dyn Backend> {
    #[cfg(feature = "pooled")]
    if options.prefer_pooled {
        match pooled::PooledBackend::new() {
            Ok(backend) => return Box::new(backend),
            Err(error) => {
                tracing::debug!(error = %error, "pooled backend unavailable, falling back")
            }
        }
    }
    Box::new(direct::DirectBackend::new(options.tls_config.clone()))
}

/// Whether a reply to `method` with `status` carries a body.
///
/// False for HEAD, informational statuses, 204 No Content and
/// 304 Not Modified; true otherwise.
pub(crate) fn has_response_body(method: Method, status: i32) -> bool {
    method != Method::Head
        && !(100..200).contains(&status)
        && status != 204
        && status != 304
}

/// Check for the gzip magic bytes without consuming the reader.
///
/// Returns false when fewer than two bytes are buffered.
pub fn is_gzip(reader: &mut impl BufRead) -> io::Result<bool> {
    let buffered = reader.fill_buf()?;
    Ok(buffered.len() >= 2 && buffered[0] == 0x1f && buffered[1] == 0x8b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_gate_boundary_statuses() {
        let cases = [
            (99, true),
            (100, false),
            (199, false),
            (200, true),
            (203, true),
            (204, false),
            (205, true),
            (304, false),
            (305, true),
        ];
        for (status, expected) in cases {
            assert_eq!(
                has_response_body(Method::Get, status),
                expected,
                "status {status}"
            );
        }
    }

    #[test]
    fn test_gate_head_never_has_body() {
        for status in [200, 203, 205, 404, 500] {
            assert!(!has_response_body(Method::Head, status));
        }
    }

    #[test]
    fn test_gzip_sniff_positive() {
        let mut reader = Cursor::new(vec![0x1f, 0x8b, 0x08, 0x00]);
        assert!(is_gzip(&mut reader).unwrap());
        // The reader was not consumed.
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![0x1f, 0x8b, 0x08, 0x00]);
    }

    #[test]
    fn test_gzip_sniff_negative() {
        let mut reader = Cursor::new(b"plain text".to_vec());
        assert!(!is_gzip(&mut reader).unwrap());
    }

    #[test]
    fn test_gzip_sniff_short_stream() {
        let mut reader = Cursor::new(vec![0x1f]);
        assert!(!is_gzip(&mut reader).unwrap());
        let mut reader = Cursor::new(Vec::new());
        assert!(!is_gzip(&mut reader).unwrap());
    }
}
