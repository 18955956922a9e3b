//! Tower middleware layers for the Cloud Foundry client.
//!
//! Middleware layers are applied through [`HyperClientBuilder::layer`] or
//! one of its helpers. The last layer added is the first to process
//! requests.
//!
//! # Available Layers
//!
//! - [`ErrorPayloadLayer`] - Maps error responses to typed failures
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use cloudfoundry::HyperClient;
//!
//! let client = HyperClient::builder()
//!     .with_client_v3_errors()
//!     .with_logging()
//!     .build();
//! ```
//!
//! [`HyperClientBuilder::layer`]: crate::HyperClientBuilder::layer

mod error_payload;
mod logging;

pub use error_payload::{ErrorPayload, ErrorPayloadLayer};
pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
