// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contrav_api::{ApiError, ApiErrorCode, SuccessEnvelope};
use contrav_store::StoreError;
use serde_json::Value;
use tracing::error;

#[must_use]
pub(crate) fn status_for(code: ApiErrorCode) -> StatusCode {
    match code {
        ApiErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
        ApiErrorCode::Conflict => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[must_use]
pub(crate) fn error_response(err: ApiError) -> Response {
    (status_for(err.code), Json(err.to_body())).into_response()
}

#[must_use]
pub(crate) fn success_response(status: StatusCode, envelope: SuccessEnvelope<Value>) -> Response {
    (status, Json(envelope)).into_response()
}

/// Store failures are logged with detail and surfaced as an opaque 500.
#[must_use]
pub(crate) fn store_failure(err: &StoreError) -> Response {
    error!("store failure: {err}");
    error_response(ApiError::internal("unexpected storage error"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(
            status_for(ApiErrorCode::ValidationFailed),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(ApiErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ApiErrorCode::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ApiErrorCode::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
