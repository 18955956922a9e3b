//! Prelude module for convenient imports.
//!
//! ```ignore
//! use cloudfoundry_core::prelude::*;
//! ```

pub use crate::{
    Body, Error, ErrorPayloadMapper, Failure, HttpClient, HttpClientExt, Method, Request,
    RequestBuilder, Response, Result, Schema, from_json, to_json,
};
