//! The error-payload transform applied to every Cloud Foundry response.
//!
//! An [`ErrorPayloadMapper`] is configured with one [`Schema`] and is a pure
//! function from a response to either that same response or a typed
//! [`Failure`](crate::Failure):
//!
//! - status below 400: the response is returned as is. The body is not read,
//!   nothing is allocated.
//! - status 400 and above: the body is read into memory, classified, and the
//!   call fails with [`Error::Api`].
//!
//! Redirects (3xx) are passed through like any other non-error status.

use crate::classify::classify;
use crate::{Error, Response, Result, Schema};

/// Maps error responses to typed failures for one backend schema.
///
/// # Example
///
/// ```ignore
/// use cloudfoundry_core::{Error, ErrorPayloadMapper, Failure};
///
/// let response = client.execute(request).await?;
/// match ErrorPayloadMapper::for_client_v3().map(response).await {
///     Ok(response) => { /* decode the resource */ }
///     Err(Error::Api(Failure::ClientV3(failure))) => {
///         for error in &failure.errors {
///             eprintln!("{}: {}", error.title, error.detail);
///         }
///     }
///     Err(other) => return Err(other),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorPayloadMapper {
    schema: Schema,
}

impl ErrorPayloadMapper {
    /// Mapper for the given schema.
    #[must_use]
    pub const fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Mapper for Cloud Controller v2 endpoints.
    #[must_use]
    pub const fn for_client_v2() -> Self {
        Self::new(Schema::ClientV2)
    }

    /// Mapper for Cloud Controller v3 endpoints.
    #[must_use]
    pub const fn for_client_v3() -> Self {
        Self::new(Schema::ClientV3)
    }

    /// Mapper for UAA endpoints.
    #[must_use]
    pub const fn for_uaa() -> Self {
        Self::new(Schema::Uaa)
    }

    /// The schema error bodies are decoded with.
    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }

    /// Passes a non-error response through or fails with its typed failure.
    ///
    /// The only suspension point is reading the body of an error response;
    /// dropping the returned future cancels that read.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for every response with status `>= 400`.
    /// - The transport's error if the body of an error response cannot be read.
    pub async fn map(&self, response: Response) -> Result<Response> {
        if !response.is_error() {
            return Ok(response);
        }

        let (status, _headers, body) = response.into_parts();
        let payload = body.collect().await?;
        Err(Error::Api(classify(status, &payload, self.schema)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::task::Poll;

    use assert2::{check, let_assert};
    use bytes::Bytes;
    use futures_util::stream;

    use super::*;
    use crate::{Body, Failure};

    const V2_ERROR: &str = r#"{"code":10008,"description":"The request is semantically invalid: space_guid and name unique","error_code":"CF-UnprocessableEntity"}"#;
    const V3_ERROR: &str = r#"{"errors":[{"code":10008,"detail":"The request is semantically invalid: something went wrong","title":"CF-UnprocessableEntity"}]}"#;
    const UAA_ERROR: &str = r#"{"error":"unauthorized","error_description":"Bad credentials"}"#;

    fn response(status: u16, body: &'static str) -> Response {
        Response::new(status, HashMap::new(), Body::from(body))
    }

    /// A streamed response that records whether its body was ever polled.
    fn tracked_response(status: u16) -> (Response, Arc<AtomicBool>) {
        let polled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&polled);
        let body = Body::from_stream(stream::poll_fn(move |_| {
            flag.store(true, Ordering::SeqCst);
            Poll::<Option<Result<Bytes>>>::Ready(None)
        }));
        (Response::new(status, HashMap::new(), body), polled)
    }

    #[test]
    fn named_constructors() {
        check!(ErrorPayloadMapper::for_client_v2().schema() == Schema::ClientV2);
        check!(ErrorPayloadMapper::for_client_v3().schema() == Schema::ClientV3);
        check!(ErrorPayloadMapper::for_uaa().schema() == Schema::Uaa);
    }

    #[tokio::test]
    async fn success_passes_through_without_reading_body() {
        for mapper in [
            ErrorPayloadMapper::for_client_v2(),
            ErrorPayloadMapper::for_client_v3(),
            ErrorPayloadMapper::for_uaa(),
        ] {
            for status in [200, 201, 204, 302, 399] {
                let (response, polled) = tracked_response(status);
                let_assert!(Ok(response) = mapper.map(response).await);
                check!(response.status() == status);
                check!(response.body().is_stream());
                check!(!polled.load(Ordering::SeqCst));
            }
        }
    }

    #[tokio::test]
    async fn success_body_is_still_readable() {
        let mapper = ErrorPayloadMapper::for_client_v2();
        let passed = mapper
            .map(response(200, r#"{"name":"vcap"}"#))
            .await
            .expect("pass through");
        let text = passed.text().await.expect("text");
        check!(text == r#"{"name":"vcap"}"#);
    }

    #[tokio::test]
    async fn error_status_reads_body() {
        let (response, polled) = tracked_response(400);
        let_assert!(
            Err(Error::Api(Failure::Unknown(failure))) =
                ErrorPayloadMapper::for_uaa().map(response).await
        );
        check!(polled.load(Ordering::SeqCst));
        check!(failure.payload.is_empty());
    }

    #[tokio::test]
    async fn client_v2_error() {
        for status in [400, 500] {
            let result = ErrorPayloadMapper::for_client_v2()
                .map(response(status, V2_ERROR))
                .await;
            let_assert!(Err(Error::Api(Failure::ClientV2(failure))) = result);
            check!(failure.status_code == status);
            check!(failure.code == 10008);
            check!(
                failure.description
                    == "The request is semantically invalid: space_guid and name unique"
            );
            check!(failure.error_code == "CF-UnprocessableEntity");
        }
    }

    #[tokio::test]
    async fn client_v3_error() {
        for status in [400, 500] {
            let result = ErrorPayloadMapper::for_client_v3()
                .map(response(status, V3_ERROR))
                .await;
            let_assert!(Err(Error::Api(failure)) = result);
            check!(
                failure.to_string()
                    == "CF-UnprocessableEntity(10008): The request is semantically invalid: something went wrong"
            );
            let_assert!(Failure::ClientV3(failure) = failure);
            check!(failure.status_code == status);
            check!(failure.errors.len() == 1);
        }
    }

    #[tokio::test]
    async fn uaa_error() {
        for status in [400, 500] {
            let result = ErrorPayloadMapper::for_uaa()
                .map(response(status, UAA_ERROR))
                .await;
            let_assert!(Err(Error::Api(Failure::Uaa(failure))) = result);
            check!(failure.status_code == status);
            check!(failure.error == "unauthorized");
            check!(failure.error_description == "Bad credentials");
            check!(failure.to_string() == "unauthorized: Bad credentials");
        }
    }

    #[tokio::test]
    async fn bad_payload_is_unknown() {
        for mapper in [
            ErrorPayloadMapper::for_client_v2(),
            ErrorPayloadMapper::for_client_v3(),
            ErrorPayloadMapper::for_uaa(),
        ] {
            let result = mapper.map(response(400, "Invalid Error Response")).await;
            let_assert!(Err(Error::Api(Failure::Unknown(failure))) = result);
            check!(failure.status_code == 400);
            check!(failure.payload == "Invalid Error Response");
        }
    }

    #[tokio::test]
    async fn body_read_error_is_propagated() {
        let body = Body::from_stream(stream::iter(vec![Err(Error::connection(
            "connection reset by peer",
        ))]));
        let response = Response::new(503, HashMap::new(), body);

        let_assert!(Err(err) = ErrorPayloadMapper::for_client_v2().map(response).await);
        check!(err.is_connection());
    }

    #[tokio::test]
    async fn concurrent_mapping_is_independent() {
        let mapper = ErrorPayloadMapper::for_client_v2();
        let tasks: Vec<_> = (0..32u16)
            .map(|i| {
                tokio::spawn(async move {
                    let status = 400 + i;
                    mapper.map(response(status, V2_ERROR)).await
                })
            })
            .collect();

        for (i, task) in (0..32u16).zip(tasks) {
            let result = task.await.expect("task");
            let_assert!(Err(Error::Api(failure)) = result);
            check!(failure.status_code() == 400 + i);
            check!(failure.schema() == Some(Schema::ClientV2));
        }
    }

    #[tokio::test]
    async fn identical_responses_give_equal_failures() {
        let mapper = ErrorPayloadMapper::for_client_v3();
        let first = mapper.map(response(422, V3_ERROR)).await;
        let second = mapper.map(response(422, V3_ERROR)).await;

        let_assert!(Err(Error::Api(first)) = first);
        let_assert!(Err(Error::Api(second)) = second);
        check!(first == second);
    }
}
