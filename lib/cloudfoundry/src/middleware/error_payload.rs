//! Error-payload middleware.
//!
//! Runs every response of the wrapped service through an
//! [`ErrorPayloadMapper`], so callers only ever see successful responses or
//! a typed [`Failure`](crate::Failure) inside [`Error::Api`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::warn;

use crate::{Error, ErrorPayloadMapper, Request, Response, Result};

/// Layer that maps error responses to typed failures.
///
/// # Example
///
/// ```ignore
/// use cloudfoundry::middleware::ErrorPayloadLayer;
/// use cloudfoundry::ErrorPayloadMapper;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(ErrorPayloadLayer::new(ErrorPayloadMapper::for_client_v3()))
///     .service(client);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ErrorPayloadLayer {
    mapper: ErrorPayloadMapper,
}

impl ErrorPayloadLayer {
    /// Create a layer applying `mapper`.
    #[must_use]
    pub const fn new(mapper: ErrorPayloadMapper) -> Self {
        Self { mapper }
    }

    /// The mapper applied to responses.
    #[must_use]
    pub const fn mapper(&self) -> ErrorPayloadMapper {
        self.mapper
    }
}

impl<S> Layer<S> for ErrorPayloadLayer {
    type Service = ErrorPayload<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorPayload {
            inner,
            mapper: self.mapper,
        }
    }
}

/// Service that maps error responses to typed failures.
#[derive(Debug, Clone)]
pub struct ErrorPayload<S> {
    inner: S,
    mapper: ErrorPayloadMapper,
}

impl<S> ErrorPayload<S> {
    /// Wrap `inner`, mapping its responses with `mapper`.
    pub const fn new(inner: S, mapper: ErrorPayloadMapper) -> Self {
        Self { inner, mapper }
    }
}

impl<S> Service<Request<Bytes>> for ErrorPayload<S>
where
    S: Service<Request<Bytes>, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let mapper = self.mapper;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(request).await?;
            let result = mapper.map(response).await;

            if let Err(Error::Api(failure)) = &result {
                warn!(
                    schema = %mapper.schema(),
                    status = failure.status_code(),
                    failure = %failure,
                    "error response mapped to failure"
                );
            }

            result
        })
    }
}
