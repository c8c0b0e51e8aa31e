// SPDX-License-Identifier: Apache-2.0

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Legacy liveness probe kept for the back-office client; returns the fixed
/// string it polls for.
pub(crate) async fn test_handler() -> impl IntoResponse {
    "test"
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}
