//! Typed failures produced from Cloud Foundry error responses.
//!
//! Every error status (`>= 400`) is turned into exactly one [`Failure`]:
//! the variant native to the schema the caller selected when the body
//! decodes as that schema's envelope, [`Failure::Unknown`] otherwise.

use std::fmt;

use derive_more::{Display, Error, From};
use serde::Deserialize;

use crate::Schema;

/// Failure reported by a Cloud Controller v2 endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{error_code}({code}): {description}")]
pub struct ClientV2Failure {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Numeric Cloud Controller error code.
    pub code: i64,
    /// Human readable description.
    pub description: String,
    /// Symbolic error code, e.g. `CF-UnprocessableEntity`.
    pub error_code: String,
}

/// One entry of a Cloud Controller v3 `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientV3Error {
    /// Numeric Cloud Controller error code.
    pub code: i64,
    /// Human readable detail.
    pub detail: String,
    /// Symbolic error title, e.g. `CF-UnprocessableEntity`.
    pub title: String,
}

impl fmt::Display for ClientV3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.title, self.code, self.detail)
    }
}

/// Failure reported by a Cloud Controller v3 endpoint.
///
/// `errors` is never empty and keeps the order the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ClientV3Failure {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Errors in server order.
    pub errors: Vec<ClientV3Error>,
}

impl fmt::Display for ClientV3Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Failure reported by the UAA authorization server.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{error}: {error_description}")]
pub struct UaaFailure {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// OAuth error identifier, e.g. `unauthorized`.
    pub error: String,
    /// Human readable description.
    pub error_description: String,
}

/// Error response whose body did not match the expected envelope.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown Cloud Foundry Exception (HTTP {status_code})")]
pub struct UnknownFailure {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Body exactly as received, decoded as UTF-8 (lossy). May be empty.
    pub payload: String,
}

/// A classified error response.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum Failure {
    /// Cloud Controller v2 error envelope.
    #[display("{_0}")]
    ClientV2(#[error(not(source))] ClientV2Failure),
    /// Cloud Controller v3 error envelope.
    #[display("{_0}")]
    ClientV3(#[error(not(source))] ClientV3Failure),
    /// UAA error envelope.
    #[display("{_0}")]
    Uaa(#[error(not(source))] UaaFailure),
    /// Body did not decode as the expected envelope.
    #[display("{_0}")]
    Unknown(#[error(not(source))] UnknownFailure),
}

impl Failure {
    /// HTTP status code of the response that produced this failure.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::ClientV2(f) => f.status_code,
            Self::ClientV3(f) => f.status_code,
            Self::Uaa(f) => f.status_code,
            Self::Unknown(f) => f.status_code,
        }
    }

    /// Schema whose envelope was decoded, `None` for [`Failure::Unknown`].
    #[must_use]
    pub const fn schema(&self) -> Option<Schema> {
        match self {
            Self::ClientV2(_) => Some(Schema::ClientV2),
            Self::ClientV3(_) => Some(Schema::ClientV3),
            Self::Uaa(_) => Some(Schema::Uaa),
            Self::Unknown(_) => None,
        }
    }

    /// Returns `true` for 4xx statuses.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }

    /// Returns `true` for 5xx statuses.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status_code(), 500..=599)
    }
}
