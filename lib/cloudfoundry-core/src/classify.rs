//! Turns an error response into a [`Failure`].

use tracing::debug;

use crate::failure::{Failure, UnknownFailure};
use crate::schema::{Schema, decode};

/// Classifies an error response body.
///
/// Only called for error statuses. The payload is decoded with `schema`
/// alone; when that fails the result is [`Failure::Unknown`] carrying the
/// payload text verbatim.
///
/// # Example
///
/// ```
/// use cloudfoundry_core::{Failure, Schema, classify};
///
/// let failure = classify(400, br#"{"error":"unauthorized","error_description":"Bad credentials"}"#, Schema::Uaa);
/// assert_eq!(failure.to_string(), "unauthorized: Bad credentials");
///
/// let failure = classify(400, b"Invalid Error Response", Schema::Uaa);
/// assert!(matches!(failure, Failure::Unknown(_)));
/// ```
#[must_use]
pub fn classify(status_code: u16, payload: &[u8], schema: Schema) -> Failure {
    match decode(payload, schema) {
        Ok(envelope) => envelope.into_failure(status_code),
        Err(reason) => {
            debug!(%schema, status_code, %reason, "error payload did not match envelope");
            UnknownFailure {
                status_code,
                payload: String::from_utf8_lossy(payload).into_owned(),
            }
            .into()
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    const V2_ERROR: &[u8] = br#"{"code":10008,"description":"The request is semantically invalid: space_guid and name unique","error_code":"CF-UnprocessableEntity"}"#;
    const V3_ERROR: &[u8] = br#"{"errors":[{"code":10008,"detail":"The request is semantically invalid: something went wrong","title":"CF-UnprocessableEntity"}]}"#;
    const UAA_ERROR: &[u8] = br#"{"error":"unauthorized","error_description":"Bad credentials"}"#;

    #[test]
    fn client_v2_failure() {
        let_assert!(Failure::ClientV2(failure) = classify(400, V2_ERROR, Schema::ClientV2));
        check!(failure.status_code == 400);
        check!(failure.code == 10008);
        check!(failure.description == "The request is semantically invalid: space_guid and name unique");
        check!(failure.error_code == "CF-UnprocessableEntity");
    }

    #[test]
    fn client_v3_failure() {
        let_assert!(Failure::ClientV3(failure) = classify(500, V3_ERROR, Schema::ClientV3));
        check!(failure.status_code == 500);
        let_assert!([error] = failure.errors.as_slice());
        check!(error.code == 10008);
        check!(error.detail == "The request is semantically invalid: something went wrong");
        check!(error.title == "CF-UnprocessableEntity");
    }

    #[test]
    fn uaa_failure_is_status_independent() {
        let bad_request = classify(400, UAA_ERROR, Schema::Uaa);
        let server_error = classify(500, UAA_ERROR, Schema::Uaa);

        let_assert!(Failure::Uaa(bad_request) = bad_request);
        let_assert!(Failure::Uaa(server_error) = server_error);
        check!(bad_request.status_code == 400);
        check!(server_error.status_code == 500);
        check!(bad_request.error == server_error.error);
        check!(bad_request.error_description == server_error.error_description);
    }

    #[test]
    fn unknown_keeps_exact_payload() {
        for schema in [Schema::ClientV2, Schema::ClientV3, Schema::Uaa] {
            let_assert!(
                Failure::Unknown(failure) = classify(400, b"Invalid Error Response", schema)
            );
            check!(failure.status_code == 400);
            check!(failure.payload == "Invalid Error Response");
        }
    }

    #[test]
    fn unknown_for_json_string_body() {
        let payload = br#""Invalid Error Response""#;
        let_assert!(Failure::Unknown(failure) = classify(400, payload, Schema::ClientV2));
        check!(failure.payload == r#""Invalid Error Response""#);
    }

    #[test]
    fn uaa_failure_behind_byte_order_mark() {
        let payload = [b"\xEF\xBB\xBF".as_slice(), UAA_ERROR].concat();
        let_assert!(Failure::Uaa(failure) = classify(401, &payload, Schema::Uaa));
        check!(failure.error == "unauthorized");
        check!(failure.error_description == "Bad credentials");
    }

    #[test]
    fn unknown_for_empty_body() {
        let_assert!(Failure::Unknown(failure) = classify(404, b"", Schema::ClientV3));
        check!(failure.status_code == 404);
        check!(failure.payload.is_empty());
    }

    #[test]
    fn unknown_for_wrong_schema() {
        let_assert!(Failure::Unknown(failure) = classify(401, UAA_ERROR, Schema::ClientV2));
        check!(failure.payload.as_bytes() == UAA_ERROR);
    }

    #[test]
    fn unknown_for_invalid_utf8_is_lossy() {
        let_assert!(Failure::Unknown(failure) = classify(502, b"bad \xff gateway", Schema::Uaa));
        check!(failure.payload == "bad \u{fffd} gateway");
    }

    #[test]
    fn classification_is_idempotent() {
        for (payload, schema) in [
            (V2_ERROR, Schema::ClientV2),
            (V3_ERROR, Schema::ClientV3),
            (UAA_ERROR, Schema::Uaa),
            (&b"<html>oops</html>"[..], Schema::Uaa),
        ] {
            check!(classify(422, payload, schema) == classify(422, payload, schema));
        }
    }
}
