//! Request/response logging middleware.
//!
//! Logs Cloud Foundry requests and their outcome using the `tracing` crate.
//! When stacked outside an [`ErrorPayloadLayer`](super::ErrorPayloadLayer)
//! the classified failure is logged with its status and message.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```ignore
/// use cloudfoundry::middleware::LoggingLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(LoggingLayer::new())
///     .service(client);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request/response headers included).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

impl<S> Service<Request<Bytes>> for Logging<S>
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
        let method = request.method().clone();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "cf_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(headers = ?request.headers(), "sending request");
                    }
                    LogLevel::Info => {
                        info!("sending request");
                    }
                }

                let result = inner.call(request).await;

                // Saturating conversion to u64
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_error() => {
                        warn!(
                            status = response.status(),
                            elapsed_ms,
                            "request failed with HTTP error"
                        );
                    }
                    Ok(response) => {
                        let status = response.status();
                        match level {
                            LogLevel::Debug => {
                                debug!(
                                    status,
                                    elapsed_ms,
                                    headers = ?response.headers(),
                                    "request completed"
                                );
                            }
                            LogLevel::Info => info!(status, elapsed_ms, "request completed"),
                        }
                    }
                    Err(Error::Api(failure)) => {
                        warn!(
                            status = failure.status_code(),
                            failure = %failure,
                            elapsed_ms,
                            "request failed with API error"
                        );
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};
    use tower::{ServiceExt, service_fn};

    use super::*;
    use crate::{Body, Method};

    #[test]
    fn logging_layer_default() {
        check!(LoggingLayer::new().level() == LogLevel::Info);
    }

    #[test]
    fn logging_layer_debug() {
        check!(LoggingLayer::debug().level() == LogLevel::Debug);
    }

    #[tokio::test]
    async fn logging_is_transparent() {
        let inner = service_fn(|_request: Request<Bytes>| async {
            Ok::<_, Error>(Response::new(404, HashMap::new(), Body::from("not found")))
        });
        let service = LoggingLayer::debug().layer(inner);

        let url = url::Url::parse("https://api.example.com/v2/apps/1").expect("url");
        let request = Request::<Bytes>::builder(Method::GET, url).build();

        let_assert!(Ok(response) = service.oneshot(request).await);
        check!(response.status() == 404);
        check!(response.text().await.expect("text") == "not found");
    }
}
