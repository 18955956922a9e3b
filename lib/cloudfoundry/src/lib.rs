//! Async Cloud Foundry client transport with typed error payloads.
//!
//! Cloud Controller v2, Cloud Controller v3 and UAA each describe failures
//! with their own JSON envelope. This crate puts a pooled hyper client in
//! front of those endpoints and turns error responses into a typed
//! [`Failure`], while successful responses are handed back untouched with
//! their body still unread.
//!
//! # Example
//!
//! ```ignore
//! use cloudfoundry::prelude::*;
//!
//! let client = HyperClient::builder()
//!     .with_client_v3_errors()
//!     .with_logging()
//!     .build();
//!
//! match client.get("https://api.example.com/v3/apps/1234").await {
//!     Ok(response) => println!("{}", response.text().await?),
//!     Err(Error::Api(Failure::ClientV3(failure))) => eprintln!("{failure}"),
//!     Err(other) => return Err(other),
//! }
//! ```
//!
//! One client can also serve several backends, choosing the schema per call
//! with [`HttpClientExt::execute_mapped`].

mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;

// Re-export client types
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use cloudfoundry_core::{
    Body, BodyStream, ClientV2Envelope, ClientV2Failure, ClientV3Envelope, ClientV3Error,
    ClientV3Failure, DecodeError, Envelope, Error, ErrorEnvelope, ErrorPayloadMapper, Failure,
    HttpClient, HttpClientExt, Method, Request, RequestBuilder, Response, Result, Schema,
    UaaEnvelope, UaaFailure, UnknownFailure, classify, decode, decode_as, from_json, to_json,
};

// Re-export http types for status codes and headers
pub use cloudfoundry_core::{StatusCode, header};

pub use url;
