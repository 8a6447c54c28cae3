//! Dual-backend blocking HTTP client.
//!
//! Executes requests through one of two interchangeable backends (a
//! low-level transport opening one connection per request, or a pooled
//! HTTP client library chosen automatically when available) and
//! normalizes both into a single response model with lazily-consumed
//! streaming bodies. Execution failures never surface as errors: the
//! facade converts them into a status `-1` response carrying the failure
//! text.
//!
//! ```no_run
//! use dual_http::{HttpClient, Request};
//!
//! let client = HttpClient::new();
//! let request = Request::builder("https://example.com/ping").build().unwrap();
//! let mut response = client.execute(&request);
//! println!("{}: {}", response.status(), response.body().string().unwrap());
//! ```

pub mod backend;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod response;

pub use client::{ClientOptions, HttpClient, Statistics};
pub use dispatch::{Dispatch, TryDispatch};
pub use error::{HttpError, HttpResult};
pub use request::{Method, Request, RequestBuilder, DEFAULT_TIMEOUT_MS};
pub use response::{Response, ResponseBody, STATUS_UNAVAILABLE};
