//! The HTTP transport collaborator.
//!
//! A [`Transport`] performs the actual network exchange for one request. The
//! [`Client`](crate::Client) owns a transport handle explicitly, so tests can
//! swap the network for an in-memory implementation.

use crate::error::TransportError;
use http::{HeaderMap, Method, StatusCode};
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use url::Url;

/// A fully constructed request, ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: Method,
    /// The parsed target URL.
    pub url: Url,
    /// Headers to send.
    pub headers: HeaderMap,
    /// The request body, sent verbatim.
    pub body: Vec<u8>,
}

/// The status and unread body stream of a completed exchange.
///
/// Dropping the response releases the underlying connection or stream.
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The body stream.
    pub body: Box<dyn Read + Send>,
}

impl TransportResponse {
    /// Creates a response from a status and any readable body.
    pub fn new(status: StatusCode, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// Creates a response whose body is already in memory.
    pub fn from_bytes(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, std::io::Cursor::new(body.into()))
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Performs HTTP exchanges.
///
/// Implementations must be safe to share between threads; the client may be
/// used from several threads at once.
///
/// # Examples
///
/// ```
/// use greq::{Client, Transport, TransportError, TransportRequest, TransportResponse};
/// use http::StatusCode;
///
/// struct Canned;
///
/// impl Transport for Canned {
///     fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
///         Ok(TransportResponse::from_bytes(StatusCode::OK, r#"{"ok":true}"#))
///     }
/// }
///
/// let client = Client::with_transport(Canned);
/// let response = client.get("http://example.invalid/", []).unwrap();
/// assert_eq!(response.text(), r#"{"ok":true}"#);
/// ```
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response with its body unread.
    fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request)
    }
}

/// The default transport, backed by a blocking `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest's default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let http_client = reqwest::blocking::Client::builder().build()?;
        Ok(Self { http_client })
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(http_client: reqwest::blocking::Client) -> Self {
        Self { http_client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let response = self
            .http_client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()?;

        Ok(TransportResponse::new(response.status(), response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_body_is_readable() {
        let mut response = TransportResponse::from_bytes(StatusCode::CREATED, "hello");
        let mut body = String::new();
        response.body.read_to_string(&mut body).unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_reqwest_transport_reports_unreachable_host() {
        let transport = ReqwestTransport::new().unwrap();
        let request = TransportRequest {
            method: Method::GET,
            url: Url::parse("http://127.0.0.1:1/").unwrap(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        };

        let err = transport.send(request).unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
