//! # greq - small HTTP requests with JSON bodies
//!
//! greq builds a request from a method, a URL, an optional body and optional
//! headers, executes it through a blocking HTTP transport, and keeps the whole
//! response body in memory. The body can then be decoded as JSON, as many
//! times as needed, into any type that implements `Deserialize`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use greq::{with_body, with_headers};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Command {
//!     object_to_fetch: String,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Book {
//!     title: String,
//!     copies_sold: u32,
//! }
//!
//! fn main() -> Result<(), greq::Error> {
//!     let command = Command { object_to_fetch: "book".to_string() };
//!
//!     let response = greq::post(
//!         "http://localhost:8080/",
//!         [with_body(&command), with_headers([("Auth", "secret-key")])],
//!     )?;
//!
//!     let mut book = Book::default();
//!     response.decode_json(&mut book)?;
//!     println!("{} sold {} copies", book.title, book.copies_sold);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuring a request
//!
//! Requests are configured in one of two equivalent ways:
//!
//! - **Options**: pass a list of [`Configurer`]s ([`with_body`],
//!   [`with_body_bytes`], [`with_headers`], or your own) to [`get`], [`post`],
//!   [`put`], [`delete`] or [`request`].
//! - **Builder**: chain calls on a [`RequestBuilder`] from
//!   [`Client::new_request`] and finish with [`RequestBuilder::send`].
//!
//! Raw body bytes always win over a body value. With neither set, the body is
//! the JSON `null`.
//!
//! ## Errors
//!
//! Each call fails with exactly one of [`Error::Encoding`], [`Error::Transport`],
//! [`Error::ResponseRead`] or [`Error::Decoding`]. Nothing is retried. A
//! non-2xx status is **not** an error; inspect [`Response::status`] or the
//! decoded payload.
//!
//! ## Transports
//!
//! The free functions create a fresh [`Client`] with the default
//! [`ReqwestTransport`] for each call. Build a [`Client`] once to reuse
//! connections, or hand it your own [`Transport`] to keep tests off the
//! network.

mod client;
pub mod config;
mod error;
mod response;
pub mod transport;

pub use client::{Client, ClientBuilder, RequestBuilder};
pub use config::{with_body, with_body_bytes, with_headers, Configurer, RequestConfig};
pub use error::{BoxError, Error, Result, TransportError};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

use http::Method;

/// Makes a request with the given method using a default [`Client`].
///
/// # Errors
///
/// See [`Client::execute`].
pub fn request(
    method: Method,
    url: impl Into<String>,
    configurers: impl IntoIterator<Item = Configurer>,
) -> Result<Response> {
    Client::new()?.request(method, url, configurers)
}

/// Makes a GET request using a default [`Client`].
pub fn get(
    url: impl Into<String>,
    configurers: impl IntoIterator<Item = Configurer>,
) -> Result<Response> {
    request(Method::GET, url, configurers)
}

/// Makes a POST request using a default [`Client`].
pub fn post(
    url: impl Into<String>,
    configurers: impl IntoIterator<Item = Configurer>,
) -> Result<Response> {
    request(Method::POST, url, configurers)
}

/// Makes a PUT request using a default [`Client`].
pub fn put(
    url: impl Into<String>,
    configurers: impl IntoIterator<Item = Configurer>,
) -> Result<Response> {
    request(Method::PUT, url, configurers)
}

/// Makes a DELETE request using a default [`Client`].
pub fn delete(
    url: impl Into<String>,
    configurers: impl IntoIterator<Item = Configurer>,
) -> Result<Response> {
    request(Method::DELETE, url, configurers)
}

/// Starts a chained request against a default [`Client`].
///
/// # Errors
///
/// Returns an error if the default transport cannot be initialized.
pub fn new_request(method: Method, url: impl Into<String>) -> Result<RequestBuilder> {
    Ok(Client::new()?.new_request(method, url))
}
