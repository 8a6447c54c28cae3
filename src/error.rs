//! Error types shared across the crate.
//!
//! # Design Decisions
//! - One crate-wide enum; callers of the facade never see it because the
//!   facade converts every execution failure into a `-1` response
//! - Build-time validation failures are the only errors surfaced as `Err`
//!   to library users

use thiserror::Error;

/// Result alias used throughout the crate.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors produced while building or executing a request.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A header mapping failed validation at build time.
    #[error("invalid header: {0}")]
    Header(String),

    /// A body was supplied for a method that carries none.
    #[error("invalid body: {0}")]
    Body(String),

    /// The target URL could not be parsed at execution time.
    #[error("invalid url '{url}': {reason}")]
    Url { url: String, reason: String },

    /// A backend could not be constructed.
    #[error("backend unavailable: {0}")]
    Backend(String),

    /// The transport failed before a status code could be produced
    /// (DNS, connect timeout, read timeout, protocol error).
    #[error("transport error: {0}")]
    Transport(String),

    /// Draining a response body failed.
    #[error("body read error")]
    Io(#[from] std::io::Error),
}
