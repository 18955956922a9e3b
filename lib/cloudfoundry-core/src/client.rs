//! HTTP client traits.
//!
//! - [`HttpClient`] - executes a request and hands back the raw response
//! - [`HttpClientExt`] - convenience requests and per-call error mapping

use std::future::Future;

use bytes::Bytes;
use http::Method;

use crate::{ErrorPayloadMapper, Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations return every response the server produced, error statuses
/// included; classifying those is the job of an [`ErrorPayloadMapper`].
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails below the HTTP level:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(&self, request: Request<Bytes>) -> impl Future<Output = Result<Response>> + Send;
}

/// Extension trait for [`HttpClient`] with convenience methods.
pub trait HttpClientExt: HttpClient {
    /// Execute a request and apply `mapper` to the response.
    ///
    /// This lets a single pooled client talk to Cloud Controller v2, v3 and
    /// UAA endpoints while picking the error schema per call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Api`] for error statuses, or the transport error.
    fn execute_mapped(
        &self,
        request: Request<Bytes>,
        mapper: ErrorPayloadMapper,
    ) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let response = self.execute(request).await?;
            mapper.map(response).await
        }
    }

    /// Execute a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the request fails.
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let url = url::Url::parse(url)?;
            self.execute(Request::builder(Method::GET, url).build())
                .await
        }
    }

    /// Execute a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the request fails.
    fn post_json<T: serde::Serialize + Send + Sync>(
        &self,
        url: &str,
        body: &T,
    ) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let url = url::Url::parse(url)?;
            let request = Request::<Bytes>::builder(Method::POST, url)
                .json(body)?
                .build();
            self.execute(request).await
        }
    }

    /// Execute a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the request fails.
    fn delete(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let url = url::Url::parse(url)?;
            self.execute(Request::builder(Method::DELETE, url).build())
                .await
        }
    }
}

impl<T: HttpClient> HttpClientExt for T {}
