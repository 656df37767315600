//! The in-memory result of a completed request.
//!
//! A [`Response`] keeps the raw body bytes. Decoding is a pure read of those
//! bytes and can be done any number of times, into any compatible type.

use crate::{Error, Result};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The raw body of a completed request, pending optional decoding.
///
/// The status code is kept for inspection but a non-2xx status is never an
/// error: callers decide what a given status means for them.
///
/// # Examples
///
/// ```
/// use greq::Response;
/// use http::StatusCode;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize, PartialEq)]
/// #[serde(rename_all = "camelCase")]
/// struct Person {
///     name: String,
///     hair_color: String,
/// }
///
/// let response = Response::new(
///     StatusCode::OK,
///     br#"{"name": "James", "hairColor": "Brown"}"#.to_vec(),
/// );
///
/// let mut person = Person::default();
/// response.decode_json(&mut person)?;
/// assert_eq!(person.name, "James");
/// assert_eq!(person.hair_color, "Brown");
/// # Ok::<(), greq::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    /// Creates a `Response` from a status and a fully read body.
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Decodes the body as JSON into `destination`.
    ///
    /// Only the first JSON value in the body is read; anything after it is
    /// ignored. An empty body is not decoded at all: the call succeeds and
    /// leaves `destination` untouched. On success `destination` is replaced by
    /// the decoded value, so fields missing from the payload need
    /// `#[serde(default)]` on the destination type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decoding`] if the body is not valid JSON or does not
    /// match the shape of `T`. `destination` is left untouched in that case.
    pub fn decode_json<T>(&self, destination: &mut T) -> Result<()>
    where
        T: DeserializeOwned,
    {
        if self.body.is_empty() {
            return Ok(());
        }

        let mut deserializer = serde_json::Deserializer::from_slice(&self.body);
        match T::deserialize(&mut deserializer) {
            Ok(value) => {
                *destination = value;
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %self.text(),
                    "Failed to decode response"
                );
                Err(Error::Decoding(e))
            }
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns `true` if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Consumes the response and returns the body bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}

impl AsRef<[u8]> for Response {
    fn as_ref(&self) -> &[u8] {
        &self.body
    }
}
