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
use contrav_model::fields::msg_taken;
use contrav_model::{validate_new_violant, validate_violant_patch, FieldErrors};
use contrav_store::DeleteOutcome;
use serde_json::{json, Value};

const ENTITY: EntityKind = EntityKind::Violant;

pub(crate) async fn list(State(state): State<AppState>) -> Response {
    match state.store.list_violants().await {
        Ok(violants) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(violants)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_violant(id).await {
        Ok(Some(violant)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(violant)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn create(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = take_body(body);
    let (draft, mut errors) = validate_new_violant(&body);
    if let Some(cin) = draft.cin.as_deref() {
        match state.store.violant_cin_taken(cin, None).await {
            Ok(true) => errors.add("cin", msg_taken("cin")),
            Ok(false) => {}
            Err(e) => return store_failure(&e),
        }
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    let Some(new) = draft.finish() else {
        return error_response(ApiError::internal(
            "violant draft incomplete after validation",
        ));
    };
    match state.store.create_violant(new).await {
        Ok(violant) => success_response(
            StatusCode::CREATED,
            SuccessEnvelope::with_data(created_message(ENTITY), json!(violant)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<Value>>,
) -> Response {
    match state.store.violant_exists(id).await {
        Ok(true) => {}
        Ok(false) => return error_response(ApiError::not_found(ENTITY)),
        Err(e) => return store_failure(&e),
    }
    let body = take_body(body);
    let patch = match validate_violant_patch(&body) {
        Ok(patch) => patch,
        Err(errors) => return error_response(ApiError::validation_failed(errors)),
    };
    let mut errors = FieldErrors::new();
    if let Some(cin) = patch.cin.as_deref() {
        match state.store.violant_cin_taken(cin, Some(id)).await {
            Ok(true) => errors.add("cin", msg_taken("cin")),
            Ok(false) => {}
            Err(e) => return store_failure(&e),
        }
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    match state.store.update_violant(id, patch).await {
        Ok(Some(violant)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data(updated_message(ENTITY), json!(violant)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete_violant(id).await {
        Ok(DeleteOutcome::Deleted) => success_response(
            StatusCode::OK,
            SuccessEnvelope::message_only(deleted_message(ENTITY)),
        ),
        Ok(DeleteOutcome::NotFound) => error_response(ApiError::not_found(ENTITY)),
        Ok(DeleteOutcome::Referenced(infraction_id)) => error_response(ApiError::referenced_by(
            ENTITY,
            EntityKind::Infraction,
            infraction_id,
        )),
        Err(e) => store_failure(&e),
    }
}
