//! Request configuration and the configurers that modify it.
//!
//! A [`RequestConfig`] is the single record both configuration styles write
//! into: the options style applies a list of [`Configurer`]s to it, and the
//! builder style in [`RequestBuilder`](crate::RequestBuilder) sets the same
//! fields through chained calls.

use crate::{Error, Result};
use http::Method;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Everything needed to issue one request.
///
/// A config is built fresh for each request and consumed when it is executed.
pub struct RequestConfig {
    /// The HTTP method.
    pub method: Method,

    /// The target URL. It is parsed when the request is executed.
    pub url: String,

    /// Headers to attach, keyed exactly as provided.
    pub headers: HashMap<String, String>,

    body: Option<serde_json::Result<Vec<u8>>>,
    body_bytes: Option<Vec<u8>>,
}

impl RequestConfig {
    /// Creates a config with no body and no headers.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            body_bytes: None,
        }
    }

    /// Sets the body value, captured as its JSON encoding.
    ///
    /// A serialization failure is kept and reported as [`Error::Encoding`]
    /// when the request executes, unless raw body bytes take its place.
    pub fn set_body<T>(&mut self, body: &T)
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_vec(body));
    }

    /// Sets raw body bytes. Non-empty bytes are sent verbatim and win over
    /// any body value; an empty sequence clears them.
    pub fn set_body_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        self.body_bytes = if bytes.is_empty() { None } else { Some(bytes) };
    }

    /// Inserts a single header, replacing a previous value under the same key.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Applies configurers in order.
    pub fn configure(&mut self, configurers: impl IntoIterator<Item = Configurer>) {
        for configurer in configurers {
            configurer.apply(self);
        }
    }

    /// Returns `true` if non-empty raw body bytes are set.
    pub fn has_body_bytes(&self) -> bool {
        self.body_bytes.is_some()
    }

    /// Resolves the bytes that go on the wire and clears both body slots.
    ///
    /// Raw bytes come first, then the encoded body value. With neither set
    /// the payload is the JSON encoding of "no value", `null`.
    pub fn take_payload(&mut self) -> Result<Vec<u8>> {
        let body = self.body.take();
        if let Some(bytes) = self.body_bytes.take() {
            return Ok(bytes);
        }
        match body {
            Some(encoded) => encoded.map_err(Error::Encoding),
            None => serde_json::to_vec(&()).map_err(Error::Encoding),
        }
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_some())
            .field("body_bytes_len", &self.body_bytes.as_ref().map(Vec::len))
            .finish()
    }
}

/// A one-shot modification of a [`RequestConfig`].
///
/// [`Configurer::new`] wraps any `FnOnce(&mut RequestConfig)` closure, so
/// callers can write their own next to [`with_body`], [`with_body_bytes`] and
/// [`with_headers`].
///
/// ```
/// use greq::{Configurer, RequestConfig};
/// use http::Method;
///
/// let trace = Configurer::new(|config: &mut RequestConfig| {
///     config.header("X-Trace", "1");
/// });
///
/// let mut config = RequestConfig::new(Method::GET, "http://localhost/");
/// config.configure([trace]);
/// assert_eq!(config.headers["X-Trace"], "1");
/// ```
pub struct Configurer(Box<dyn FnOnce(&mut RequestConfig) + Send>);

impl Configurer {
    /// Wraps a closure as a configurer.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut RequestConfig) + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// Applies the modification.
    pub fn apply(self, config: &mut RequestConfig) {
        (self.0)(config)
    }
}

impl fmt::Debug for Configurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Configurer").finish_non_exhaustive()
    }
}

/// Sets a body value on the request, sent as JSON.
///
/// The value is encoded immediately, so the configurer does not borrow it.
pub fn with_body<T>(body: &T) -> Configurer
where
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_vec(body);
    Configurer::new(move |config| config.body = Some(encoded))
}

/// Sets raw body bytes on the request. They have priority over [`with_body`].
pub fn with_body_bytes(bytes: impl Into<Vec<u8>>) -> Configurer {
    let bytes = bytes.into();
    Configurer::new(move |config| config.set_body_bytes(bytes))
}

/// Adds headers to the request. An empty mapping changes nothing.
pub fn with_headers<I, K, V>(headers: I) -> Configurer
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let headers: Vec<(String, String)> = headers
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect();
    Configurer::new(move |config| config.headers.extend(headers))
}
