//! Error envelope schemas and their strict decoder.
//!
//! Cloud Foundry backends describe errors with three different JSON shapes:
//!
//! | Schema | Envelope |
//! |--------|----------|
//! | [`Schema::ClientV2`] | `{"code": 10008, "description": "...", "error_code": "CF-..."}` |
//! | [`Schema::ClientV3`] | `{"errors": [{"code": 10008, "detail": "...", "title": "CF-..."}]}` |
//! | [`Schema::Uaa`] | `{"error": "unauthorized", "error_description": "..."}` |
//!
//! Decoding is all or nothing: a payload either yields a complete
//! [`Envelope`] or a [`DecodeError`], never a partially filled value.

use derive_more::{Display, Error};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::failure::{ClientV2Failure, ClientV3Error, ClientV3Failure, Failure, UaaFailure};

/// A backend error format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Schema {
    /// Cloud Controller v2 API.
    #[display("v2")]
    ClientV2,
    /// Cloud Controller v3 API.
    #[display("v3")]
    ClientV3,
    /// UAA authorization server.
    #[display("uaa")]
    Uaa,
}

/// Reason a payload did not decode as the expected envelope.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DecodeError {
    /// Payload is empty or its top-level JSON value is not an object.
    #[display("error payload is not a JSON object")]
    NotAnObject,

    /// Payload is not valid JSON, or a field is missing or has the wrong type.
    #[display("invalid error payload at '{path}': {message}")]
    Json {
        /// JSON path to the offending field.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A v3 envelope whose `errors` array is empty.
    #[display("error payload has an empty 'errors' array")]
    EmptyErrors,
}

/// A JSON error envelope together with the failure it turns into.
///
/// Implementations are the per-schema descriptors used by [`decode`]: the
/// serde shape, any structural check serde cannot express, and the failure
/// constructor.
pub trait ErrorEnvelope: DeserializeOwned {
    /// Schema this envelope belongs to.
    const SCHEMA: Schema;

    /// Checks invariants beyond the serde shape.
    fn validate(&self) -> Result<(), DecodeError> {
        Ok(())
    }

    /// Builds the schema-native failure for a response with `status_code`.
    fn into_failure(self, status_code: u16) -> Failure;
}

/// Cloud Controller v2 error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientV2Envelope {
    /// Numeric error code.
    pub code: i64,
    /// Description.
    pub description: String,
    /// Symbolic error code.
    pub error_code: String,
}

impl ErrorEnvelope for ClientV2Envelope {
    const SCHEMA: Schema = Schema::ClientV2;

    fn into_failure(self, status_code: u16) -> Failure {
        ClientV2Failure {
            status_code,
            code: self.code,
            description: self.description,
            error_code: self.error_code,
        }
        .into()
    }
}

/// Cloud Controller v3 error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientV3Envelope {
    /// Errors in server order.
    pub errors: Vec<ClientV3Error>,
}

impl ErrorEnvelope for ClientV3Envelope {
    const SCHEMA: Schema = Schema::ClientV3;

    fn validate(&self) -> Result<(), DecodeError> {
        if self.errors.is_empty() {
            return Err(DecodeError::EmptyErrors);
        }
        Ok(())
    }

    fn into_failure(self, status_code: u16) -> Failure {
        ClientV3Failure {
            status_code,
            errors: self.errors,
        }
        .into()
    }
}

/// UAA error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UaaEnvelope {
    /// OAuth error identifier.
    pub error: String,
    /// Description.
    pub error_description: String,
}

impl ErrorEnvelope for UaaEnvelope {
    const SCHEMA: Schema = Schema::Uaa;

    fn into_failure(self, status_code: u16) -> Failure {
        UaaFailure {
            status_code,
            error: self.error,
            error_description: self.error_description,
        }
        .into()
    }
}

/// A successfully decoded envelope of any schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// v2 envelope.
    ClientV2(ClientV2Envelope),
    /// v3 envelope.
    ClientV3(ClientV3Envelope),
    /// UAA envelope.
    Uaa(UaaEnvelope),
}

impl Envelope {
    /// Schema of the decoded envelope.
    #[must_use]
    pub const fn schema(&self) -> Schema {
        match self {
            Self::ClientV2(_) => ClientV2Envelope::SCHEMA,
            Self::ClientV3(_) => ClientV3Envelope::SCHEMA,
            Self::Uaa(_) => UaaEnvelope::SCHEMA,
        }
    }

    /// Builds the schema-native failure for a response with `status_code`.
    #[must_use]
    pub fn into_failure(self, status_code: u16) -> Failure {
        match self {
            Self::ClientV2(envelope) => envelope.into_failure(status_code),
            Self::ClientV3(envelope) => envelope.into_failure(status_code),
            Self::Uaa(envelope) => envelope.into_failure(status_code),
        }
    }
}

/// Decodes `bytes` as the envelope of `schema`.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the payload is not a JSON object, does not
/// match the schema's shape, or fails the schema's own checks.
///
/// # Example
///
/// ```
/// use cloudfoundry_core::{Schema, decode};
///
/// let envelope = decode(br#"{"error":"unauthorized","error_description":"Bad credentials"}"#, Schema::Uaa)
///     .expect("uaa envelope");
/// assert_eq!(envelope.schema(), Schema::Uaa);
///
/// assert!(decode(b"Invalid Error Response", Schema::ClientV2).is_err());
/// ```
pub fn decode(bytes: &[u8], schema: Schema) -> Result<Envelope, DecodeError> {
    match schema {
        Schema::ClientV2 => decode_as(bytes).map(Envelope::ClientV2),
        Schema::ClientV3 => decode_as(bytes).map(Envelope::ClientV3),
        Schema::Uaa => decode_as(bytes).map(Envelope::Uaa),
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes `bytes` as envelope `E`.
///
/// A leading UTF-8 byte order mark is skipped.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_as<E: ErrorEnvelope>(bytes: &[u8]) -> Result<E, DecodeError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    // serde accepts sequences for structs; envelopes are objects only
    if bytes.trim_ascii_start().first() != Some(&b'{') {
        return Err(DecodeError::NotAnObject);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let envelope: E = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        DecodeError::Json {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })?;
    deserializer.end().map_err(|e| DecodeError::Json {
        path: ".".to_string(),
        message: e.to_string(),
    })?;

    envelope.validate()?;
    Ok(envelope)
}
