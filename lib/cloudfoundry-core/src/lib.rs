//! Core types for the Cloud Foundry client.
//!
//! The heart of this crate is the error-payload layer that sits between the
//! HTTP transport and application code:
//!
//! - [`Body`] - lazily read response body; [`Body::collect`] buffers it
//! - [`decode`] and [`Schema`] - strict decoding of the v2, v3 and UAA error envelopes
//! - [`classify`] - builds a typed [`Failure`] from an error response
//! - [`ErrorPayloadMapper`] - passes successful responses through, fails the rest
//!
//! Alongside it live the transport-facing types:
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution

mod body;
mod classify;
mod client;
mod error;
mod failure;
mod mapper;
pub mod prelude;
mod request;
mod response;
mod schema;

pub use body::{Body, BodyStream, from_json, to_json};
pub use classify::classify;
pub use client::{HttpClient, HttpClientExt};
pub use error::{Error, Result};
pub use failure::{
    ClientV2Failure, ClientV3Error, ClientV3Failure, Failure, UaaFailure, UnknownFailure,
};
pub use mapper::ErrorPayloadMapper;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use schema::{
    ClientV2Envelope, ClientV3Envelope, DecodeError, Envelope, ErrorEnvelope, Schema, UaaEnvelope,
    decode, decode_as,
};

// Re-export http crate types for methods, status codes and headers
pub use http::{Method, StatusCode, header};
