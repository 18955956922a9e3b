//! Prelude module for convenient imports.
//!
//! ```ignore
//! use cloudfoundry::prelude::*;
//! ```

pub use crate::{
    ClientConfig, Error, ErrorPayloadMapper, Failure, HttpClient, HttpClientExt, HyperClient,
    Method, Request, RequestBuilder, Response, Result, Schema, StatusCode, from_json, header,
    to_json,
};
pub use serde::{Deserialize, Serialize};
