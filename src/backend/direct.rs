//! Low-level adapter: one connection per request.
//!
//! # Responsibilities
//! - Open a fresh connection for every execution, with redirects and
//!   connection reuse disabled
//! - Apply request headers, timeouts and the optional TLS configuration
//! - Keep the connection open past the adapter boundary when a body is
//!   expected, bound to the body stream's lifetime
//!
//! # Design Decisions
//! - A non-success status still carries a readable reply; the adapter
//!   prefers the success channel and falls back to the error channel
//! - The TLS hook applies only here; the pooled adapter has no equivalent

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::backend::{has_response_body, Backend, HEADER_CONTENT_TYPE};
use crate::error::{HttpError, HttpResult};
use crate::request::Request;
use crate::response::{Headers, Response};

pub(crate) struct DirectBackend {
    tls_config: Option<Arc<rustls::ClientConfig>>,
}

impl DirectBackend {
    pub(crate) fn new(tls_config: Option<Arc<rustls::ClientConfig>>) -> Self {
        Self { tls_config }
    }

    fn agent_for(&self, request: &Request, parsed: &Url) -> ureq::Agent {
        let timeout = Duration::from_millis(request.timeout_ms());
        let mut builder = ureq::builder()
            .redirects(0)
            .max_idle_connections(0)
            .timeout_connect(timeout)
            .timeout_read(timeout);
        if parsed.scheme() == "https" {
            if let Some(tls_config) = &self.tls_config {
                builder = builder.tls_config(Arc::clone(tls_config));
            }
        }
        builder.build()
    }
}

impl Backend for DirectBackend {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn execute(&self, request: &Request) -> HttpResult<Response> {
        let parsed = Url::parse(request.url()).map_err(|error| HttpError::Url {
            url: request.url().to_string(),
            reason: error.to_string(),
        })?;
        let agent = self.agent_for(request, &parsed);

        let mut call = agent.request(request.method().as_str(), request.url());
        for (name, value) in request.headers() {
            call = call.set(name, value);
        }

        let outcome = match (request.method().allows_body(), request.body()) {
            (true, Some(body)) => {
                if !request.has_content_type() {
                    call = call.set(HEADER_CONTENT_TYPE, request.body_content_type());
                }
                call.send_bytes(body)
            }
            _ => call.call(),
        };

        let raw = match outcome {
            Ok(raw) => raw,
            // Error-channel reply: the status was produced, the stream is
            // still readable.
            Err(ureq::Error::Status(_, raw)) => raw,
            Err(error) => return Err(HttpError::Transport(error.to_string())),
        };

        let status = i32::from(raw.status());
        let headers = collect_headers(&raw);

        if !has_response_body(request.method(), status) {
            // raw and agent drop here, disconnecting immediately.
            return Ok(Response::without_body(status, headers));
        }

        let content_length = raw
            .header("Content-Length")
            .and_then(|value| value.parse().ok())
            .unwrap_or(-1);
        let reader = raw.into_reader();
        Ok(Response::with_body(
            status,
            headers,
            content_length,
            Box::new(ConnectionStream {
                reader,
                _agent: agent,
            }),
        ))
    }
}

fn collect_headers(raw: &ureq::Response) -> Headers {
    let mut headers = Headers::new();
    for name in raw.headers_names() {
        let values = raw.all(&name).iter().map(|v| v.to_string()).collect();
        headers.insert(name, values);
    }
    headers
}

/// Body stream that owns its connection.
///
/// The agent holds the socket; dropping this stream drops both, so closing
/// the body is the disconnect signal.
struct ConnectionStream<R: Read> {
    reader: R,
    _agent: ureq::Agent,
}

impl<R: Read> Read for ConnectionStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}
