//! Error types for request execution and response decoding.
//!
//! Every failure of a call is terminal: nothing is retried internally, and each
//! variant wraps the underlying cause so the original diagnostic survives.

/// A boxed error produced by a foreign [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for a request/response cycle.
///
/// # Examples
///
/// ```no_run
/// use greq::Error;
///
/// match greq::get("http://localhost:9999/", []) {
///     Ok(response) => println!("{} bytes", response.bytes().len()),
///     Err(Error::Transport(e)) => eprintln!("could not reach server: {}", e),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request body value could not be serialized to JSON.
    #[error("encoding body failed: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The request could not be constructed or the transport failed to
    /// complete the exchange (connection refused, DNS, TLS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body stream could not be read to the end.
    #[error("reading body failed: {0}")]
    ResponseRead(#[source] std::io::Error),

    /// The response body is not valid JSON or does not fit the destination.
    #[error("decoding response into JSON failed: {0}")]
    Decoding(#[source] serde_json::Error),
}

impl Error {
    /// Returns `true` if the request body failed to serialize.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::Encoding(_))
    }

    /// Returns `true` if building or sending the request failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns `true` if the response body could not be read.
    pub fn is_response_read(&self) -> bool {
        matches!(self, Error::ResponseRead(_))
    }

    /// Returns `true` if the response body could not be decoded.
    pub fn is_decoding(&self) -> bool {
        matches!(self, Error::Decoding(_))
    }
}

/// Failures raised while turning a configuration into a wire request or while
/// the transport performs the exchange.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The target URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The default reqwest transport failed.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A custom transport failed.
    #[error("transport error: {0}")]
    Other(#[source] BoxError),
}

impl TransportError {
    /// Wraps an arbitrary error raised by a custom transport.
    pub fn other(e: impl Into<BoxError>) -> Self {
        TransportError::Other(e.into())
    }
}

/// A specialized `Result` type for greq calls.
pub type Result<T> = std::result::Result<T, Error>;
