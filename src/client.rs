//! Execution facade: timing, failure normalization and statistics.
//!
//! # Responsibilities
//! - Select a backend once at construction
//! - Time every execution with a monotonic clock
//! - Convert backend failures into a `-1` response carrying the rendered
//!   error text, so callers always receive a response
//! - Notify the optional statistics sink exactly once per execution
//!
//! # Design Decisions
//! - `execute` never returns an error and never panics; exceptions exist
//!   only below the facade
//! - A misbehaving statistics sink is caught and logged, never surfaced

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::backend::{self, Backend};
use crate::error::HttpError;
use crate::request::Request;
use crate::response::Response;

/// Receives (url, status code, elapsed milliseconds) for every completed
/// execution, including locally-failed ones reported with status -1.
pub trait Statistics: Send + Sync {
    fn count(&self, url: &str, status: i32, elapsed_ms: u64);
}

/// Construction-time options for [`HttpClient`].
#[derive(Clone)]
pub struct ClientOptions {
    /// Prefer the pooled backend when it is compiled in and constructible.
    /// Set to false to force the direct backend.
    pub prefer_pooled: bool,
    /// Custom TLS configuration, honored by the direct backend only.
    pub tls_config: Option<Arc<rustls::ClientConfig>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            prefer_pooled: true,
            tls_config: None,
        }
    }
}

/// Blocking HTTP client over an interchangeable backend.
pub struct HttpClient {
    backend: Box<dyn Backend>,
    statistics: Option<Arc<dyn Statistics>>,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_options(options: ClientOptions) -> Self {
        let backend = backend::select(&options);
        tracing::debug!(backend = backend.name(), "http client backend selected");
        Self {
            backend,
            statistics: None,
        }
    }

    #[cfg(test)]
    fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            statistics: None,
        }
    }

    /// Attach a statistics sink. Builder-style, consumes the client.
    pub fn statistics(mut self, sink: Arc<dyn Statistics>) -> Self {
        self.statistics = Some(sink);
        self
    }

    /// Execute the request, blocking until the reply headers are available.
    ///
    /// Always returns a response: a backend failure yields status -1 with
    /// the rendered failure text as body.
    pub fn execute(&self, request: &Request) -> Response {
        let started = Instant::now();

        let response = match self.backend.execute(request) {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(
                    url = %request.url(),
                    backend = self.backend.name(),
                    error = %error,
                    "request execution failed"
                );
                Response::failure(render_error_chain(&error))
            }
        };

        if let Some(sink) = &self.statistics {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            let status = response.status();
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                sink.count(request.url(), status, elapsed_ms);
            }));
            if outcome.is_err() {
                tracing::warn!(url = %request.url(), "statistics sink panicked");
            }
        }

        response
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an error and its cause chain as the failure body text.
fn render_error_chain(error: &HttpError) -> String {
    let mut text = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push_str("\ncaused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
