//! Blocking HTTP client with JSON bodies and on-demand JSON decoding.
//!
//! The [`Client`] type executes requests through its [`Transport`]. Requests
//! are configured either with a list of [`Configurer`]s or by chaining calls on
//! a [`RequestBuilder`]; both write into the same [`RequestConfig`].

use crate::{
    config::RequestConfig,
    error::TransportError,
    transport::{ReqwestTransport, Transport, TransportRequest},
    Configurer, Response, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// A blocking HTTP client.
///
/// The client is cheap to clone and safe to share between threads. Every call
/// is independent: nothing is cached and nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use greq::{with_body, with_headers, Client};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Command {
///     object_to_fetch: String,
/// }
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Book {
///     title: String,
///     copies_sold: u32,
/// }
///
/// # fn example() -> Result<(), greq::Error> {
/// let client = Client::new()?;
///
/// // Options style
/// let command = Command { object_to_fetch: "book".to_string() };
/// let response = client.post(
///     "http://localhost:8080/",
///     [with_body(&command), with_headers([("Auth", "secret-key")])],
/// )?;
/// let mut book = Book::default();
/// response.decode_json(&mut book)?;
///
/// // Builder style
/// let response = client
///     .new_request(http::Method::POST, "http://localhost:8080/")
///     .body(&command)
///     .header("Auth", "secret-key")
///     .send()?;
/// response.decode_json(&mut book)?;
/// println!("{} sold {} copies", book.title, book.copies_sold);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Box<dyn Transport>,
    default_headers: HeaderMap,
}

impl Client {
    /// Creates a client backed by the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) if the HTTP
    /// client cannot be initialized.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Creates a client that sends every request through `transport`.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::from_parts(Box::new(transport), HeaderMap::new())
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    fn from_parts(transport: Box<dyn Transport>, default_headers: HeaderMap) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                default_headers,
            }),
        }
    }

    /// Executes a fully configured request.
    ///
    /// The body is resolved first (raw bytes, else the encoded body value,
    /// else `null`), then the URL and headers are checked and the transport is
    /// called. The whole response body is read into memory. The response
    /// status is not inspected.
    ///
    /// # Errors
    ///
    /// * [`Error::Encoding`](crate::Error::Encoding) if the body value could
    ///   not be serialized
    /// * [`Error::Transport`](crate::Error::Transport) if the URL or a header
    ///   is invalid, or the exchange failed
    /// * [`Error::ResponseRead`](crate::Error::ResponseRead) if the body
    ///   stream broke off
    pub fn execute(&self, mut config: RequestConfig) -> Result<Response> {
        let span = tracing::debug_span!("request", method = %config.method, url = %config.url);
        let _entered = span.enter();

        let body = config.take_payload()?;
        let request = self.build_request(config, body)?;

        tracing::debug!(body_len = request.body.len(), "Executing HTTP request");
        let start_time = Instant::now();

        let mut response = self.inner.transport.send(request).map_err(|e| {
            tracing::warn!(error = %e, "Request failed");
            e
        })?;

        let mut body = Vec::new();
        response
            .body
            .read_to_end(&mut body)
            .map_err(crate::Error::ResponseRead)?;

        tracing::debug!(
            status = response.status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            body_len = body.len(),
            "Received HTTP response"
        );

        Ok(Response::new(response.status, body))
    }

    /// Turns a config into a wire request, merging in the default headers.
    fn build_request(
        &self,
        config: RequestConfig,
        body: Vec<u8>,
    ) -> std::result::Result<TransportRequest, TransportError> {
        let url = Url::parse(&config.url)?;

        let pairs = config
            .headers
            .iter()
            .map(|(name, value)| header_pair(name, value))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut headers = self.inner.default_headers.clone();
        for (name, _) in &pairs {
            headers.remove(name);
        }
        for (name, value) in pairs {
            headers.append(name, value);
        }

        Ok(TransportRequest {
            method: config.method,
            url,
            headers,
            body,
        })
    }

    /// Makes a request with the given method, applying `configurers` in order.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use greq::{with_body_bytes, Client};
    /// use http::Method;
    ///
    /// # fn example() -> Result<(), greq::Error> {
    /// let client = Client::new()?;
    /// let response = client.request(
    ///     Method::PATCH,
    ///     "http://localhost:8080/books/1",
    ///     [with_body_bytes(r#"{"copiesSold": 43}"#)],
    /// )?;
    /// println!("{}", response.text());
    /// # Ok(())
    /// # }
    /// ```
    pub fn request(
        &self,
        method: Method,
        url: impl Into<String>,
        configurers: impl IntoIterator<Item = Configurer>,
    ) -> Result<Response> {
        let mut config = RequestConfig::new(method, url);
        config.configure(configurers);
        self.execute(config)
    }

    /// Makes a GET request.
    pub fn get(
        &self,
        url: impl Into<String>,
        configurers: impl IntoIterator<Item = Configurer>,
    ) -> Result<Response> {
        self.request(Method::GET, url, configurers)
    }

    /// Makes a POST request.
    pub fn post(
        &self,
        url: impl Into<String>,
        configurers: impl IntoIterator<Item = Configurer>,
    ) -> Result<Response> {
        self.request(Method::POST, url, configurers)
    }

    /// Makes a PUT request.
    pub fn put(
        &self,
        url: impl Into<String>,
        configurers: impl IntoIterator<Item = Configurer>,
    ) -> Result<Response> {
        self.request(Method::PUT, url, configurers)
    }

    /// Makes a DELETE request.
    pub fn delete(
        &self,
        url: impl Into<String>,
        configurers: impl IntoIterator<Item = Configurer>,
    ) -> Result<Response> {
        self.request(Method::DELETE, url, configurers)
    }

    /// Starts a request to be configured by chaining calls.
    pub fn new_request(&self, method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            client: self.clone(),
            config: RequestConfig::new(method, url),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("default_headers", &self.inner.default_headers)
            .finish_non_exhaustive()
    }
}

fn header_pair(
    name: &str,
    value: &str,
) -> std::result::Result<(HeaderName, HeaderValue), TransportError> {
    let header_name = HeaderName::try_from(name)
        .map_err(|e| TransportError::InvalidHeader(format!("name {:?}: {}", name, e)))?;
    let header_value = HeaderValue::try_from(value)
        .map_err(|e| TransportError::InvalidHeader(format!("value for {:?}: {}", name, e)))?;
    Ok((header_name, header_value))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use greq::{Client, ReqwestTransport};
///
/// # fn example() -> Result<(), greq::Error> {
/// let client = Client::builder()
///     .transport(ReqwestTransport::new()?)
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    transport: Option<Box<dyn Transport>>,
    default_headers: HeaderMap,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transport. Without one, a [`ReqwestTransport`] is built.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Adds a header sent with every request unless the request sets a
    /// header of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = header_pair(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be initialized.
    pub fn build(self) -> Result<Client> {
        let transport: Box<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Box::new(ReqwestTransport::new()?),
        };
        Ok(Client::from_parts(transport, self.default_headers))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("has_transport", &self.transport.is_some())
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

/// A request configured by chaining calls, executed by [`send`](Self::send).
///
/// # Examples
///
/// ```no_run
/// use http::Method;
///
/// # fn example() -> Result<(), greq::Error> {
/// let response = greq::new_request(Method::PUT, "http://localhost:8080/books/1")?
///     .body(&serde_json::json!({ "title": "Mostly Harmless" }))
///     .header("Auth", "secret-key")
///     .send()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    client: Client,
    config: RequestConfig,
}

impl RequestBuilder {
    /// Sets the body value, sent as JSON.
    pub fn body<T>(mut self, body: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.config.set_body(body);
        self
    }

    /// Sets raw body bytes. They have priority over [`body`](Self::body).
    pub fn body_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.config.set_body_bytes(bytes);
        self
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.header(name, value);
        self
    }

    /// Adds headers. An empty mapping changes nothing.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config.headers.extend(
            headers
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    /// Applies configurers, as the options style does.
    pub fn configure(mut self, configurers: impl IntoIterator<Item = Configurer>) -> Self {
        self.config.configure(configurers);
        self
    }

    /// Executes the request. See [`Client::execute`].
    pub fn send(self) -> Result<Response> {
        self.client.execute(self.config)
    }
}
