//! Response bodies and JSON helpers.
//!
//! A [`Body`] is either already buffered or a lazy stream of chunks handed
//! over by the transport. Nothing reads the stream until [`Body::collect`]
//! is awaited, so responses that are passed through untouched never pay for
//! buffering.

use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use futures_util::StreamExt;

use crate::Result;

/// A stream of body chunks produced by the transport.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// HTTP response body.
#[derive(Default)]
pub enum Body {
    /// Body bytes already in memory.
    Full(Bytes),
    /// Body still owned by the transport, read on demand.
    Stream(BodyStream),
    /// No body at all.
    #[default]
    Empty,
}

impl Body {
    /// Wraps a chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self::Stream(Box::pin(stream))
    }

    /// Returns `true` if the body is a stream that has not been read yet.
    #[must_use]
    pub const fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Reads the whole body into memory.
    ///
    /// The stream is consumed exactly once; an empty body yields empty bytes.
    /// No size limit is applied here.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the underlying stream.
    pub async fn collect(self) -> Result<Bytes> {
        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::Full(bytes) => Ok(bytes),
            Self::Stream(mut stream) => {
                let mut buffer = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buffer.extend_from_slice(&chunk?);
                }
                Ok(buffer.freeze())
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::Full(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Full(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Full(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::Full(Bytes::from_static(text.as_bytes()))
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes, reporting the path of the offending field on error.
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] with the failing path
/// (e.g. `resources[0].entity.name`).
///
/// # Example
///
/// ```
/// use cloudfoundry_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Info { name: String }
///
/// let info: Info = from_json(br#"{"name":"vcap"}"#).expect("deserialize");
/// assert_eq!(info, Info { name: "vcap".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
