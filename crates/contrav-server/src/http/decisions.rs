// SPDX-License-Identifier: Apache-2.0

use crate::http::response_contract::{error_response, store_failure, success_response};
use crate::http::take_body;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use contrav_api::{
    created_message, deleted_message, updated_message, ApiError, EntityKind, SuccessEnvelope,
};
use contrav_model::fields::{msg_exists, FieldErrors};
use contrav_model::{validate_decision_patch, validate_new_decision};
use contrav_store::DeleteOutcome;
use serde_json::{json, Value};

const ENTITY: EntityKind = EntityKind::Decision;

pub(crate) async fn list(State(state): State<AppState>) -> Response {
    match state.store.list_decisions().await {
        Ok(decisions) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(decisions)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_decision(id).await {
        Ok(Some(decision)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(decision)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn create(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = take_body(body);
    let (draft, mut errors) = validate_new_decision(&body);
    if let Some(infraction_id) = draft.infraction_id {
        match state.store.infraction_exists(infraction_id).await {
            Ok(false) => errors.add("infraction_id", msg_exists("infraction_id")),
            Ok(true) => {}
            Err(e) => return store_failure(&e),
        }
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    let Some(new) = draft.finish() else {
        return error_response(ApiError::internal(
            "decision draft incomplete after validation",
        ));
    };
    match state.store.create_decision(new).await {
        Ok(decision) => success_response(
            StatusCode::CREATED,
            SuccessEnvelope::with_data(created_message(ENTITY), json!(decision)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<Value>>,
) -> Response {
    match state.store.get_decision(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(ApiError::not_found(ENTITY)),
        Err(e) => return store_failure(&e),
    }
    let body = take_body(body);
    let patch = match validate_decision_patch(&body) {
        Ok(patch) => patch,
        Err(errors) => return error_response(ApiError::validation_failed(errors)),
    };
    let mut errors = FieldErrors::new();
    if let Some(infraction_id) = patch.infraction_id {
        match state.store.infraction_exists(infraction_id).await {
            Ok(false) => errors.add("infraction_id", msg_exists("infraction_id")),
            Ok(true) => {}
            Err(e) => return store_failure(&e),
        }
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    match state.store.update_decision(id, patch).await {
        Ok(Some(decision)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data(updated_message(ENTITY), json!(decision)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

/// Decisions are leaves; delete is unconditional once the row exists.
pub(crate) async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete_decision(id).await {
        Ok(DeleteOutcome::Deleted) => success_response(
            StatusCode::OK,
            SuccessEnvelope::message_only(deleted_message(ENTITY)),
        ),
        Ok(DeleteOutcome::NotFound) => error_response(ApiError::not_found(ENTITY)),
        Ok(DeleteOutcome::Referenced(_)) => {
            error_response(ApiError::internal("decision delete cannot be referenced"))
        }
        Err(e) => store_failure(&e),
    }
}
