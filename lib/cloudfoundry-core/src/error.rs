//! Error types for the Cloud Foundry client.

use derive_more::{Display, Error, From};

use crate::Failure;

/// Main error type for client operations.
///
/// Error responses from the platform arrive as [`Error::Api`] once an
/// [`ErrorPayloadMapper`](crate::ErrorPayloadMapper) has classified them;
/// every other variant describes a problem below the API level.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The platform answered with an error status.
    #[display("{_0}")]
    #[from]
    Api(#[error(not(source))] Failure),

    /// Network/connection errors, including failures while reading a body.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Response that could not be interpreted.
    #[display("invalid response: {_0}")]
    #[from(skip)]
    InvalidResponse(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "resources[0].entity.name").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// The classified failure, if the platform answered with an error status.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Api(failure) => Some(failure),
            _ => None,
        }
    }

    /// Consumes the error, returning the classified failure if any.
    #[must_use]
    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Self::Api(failure) => Some(failure),
            _ => None,
        }
    }

    /// HTTP status code of an API failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(failure) => Some(failure.status_code()),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.failure().is_some_and(Failure::is_client_error)
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.failure().is_some_and(Failure::is_server_error)
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientV2Failure, UnknownFailure};

    fn not_found() -> Error {
        Error::from(Failure::from(ClientV2Failure {
            status_code: 404,
            code: 100_004,
            description: "The app could not be found: 1234".to_string(),
            error_code: "CF-AppNotFound".to_string(),
        }))
    }

    #[test]
    fn error_display() {
        assert_eq!(
            not_found().to_string(),
            "CF-AppNotFound(100004): The app could not be found: 1234"
        );

        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "connection error: failed to connect");

        let err = Error::json_deserialization("resources[0].entity.name", "missing field `name`");
        assert_eq!(
            err.to_string(),
            "JSON deserialization error at 'resources[0].entity.name': missing field `name`"
        );
    }

    #[test]
    fn error_status() {
        let err = not_found();
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert!(err.is_not_found());

        let err = Error::from(Failure::from(UnknownFailure {
            status_code: 503,
            payload: String::new(),
        }));
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_client_error());
        assert!(err.is_server_error());

        let err = Error::Timeout;
        assert_eq!(err.status(), None);
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn error_failure_accessors() {
        let err = not_found();
        assert!(matches!(err.failure(), Some(Failure::ClientV2(_))));
        assert!(matches!(err.into_failure(), Some(Failure::ClientV2(_))));

        assert!(Error::connection("reset").failure().is_none());
        assert!(Error::Timeout.into_failure().is_none());
    }

    #[test]
    fn error_predicates() {
        assert!(Error::Timeout.is_timeout());
        assert!(!not_found().is_timeout());
        assert!(Error::connection("failed").is_connection());
        assert!(!Error::Timeout.is_connection());
    }
}
