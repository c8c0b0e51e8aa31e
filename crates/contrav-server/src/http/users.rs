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
use contrav_model::{validate_new_user, validate_user_patch, FieldErrors};
use contrav_store::DeleteOutcome;
use serde_json::{json, Value};

const ENTITY: EntityKind = EntityKind::User;

pub(crate) async fn list(State(state): State<AppState>) -> Response {
    match state.store.list_users().await {
        Ok(users) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(users)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_user(id).await {
        Ok(Some(user)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(user)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn create(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = take_body(body);
    let (draft, mut errors) = validate_new_user(&body);
    if let Some(login) = draft.login.as_deref() {
        match state.store.user_login_taken(login, None).await {
            Ok(true) => errors.add("login", msg_taken("login")),
            Ok(false) => {}
            Err(e) => return store_failure(&e),
        }
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    let Some(new) = draft.finish() else {
        return error_response(ApiError::internal("user draft incomplete after validation"));
    };
    match state.store.create_user(new).await {
        Ok(user) => success_response(
            StatusCode::CREATED,
            SuccessEnvelope::with_data(created_message(ENTITY), json!(user)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<Value>>,
) -> Response {
    match state.store.get_user(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(ApiError::not_found(ENTITY)),
        Err(e) => return store_failure(&e),
    }
    let body = take_body(body);
    let patch = match validate_user_patch(&body) {
        Ok(patch) => patch,
        Err(errors) => return error_response(ApiError::validation_failed(errors)),
    };
    let mut errors = FieldErrors::new();
    if let Some(login) = patch.login.as_deref() {
        match state.store.user_login_taken(login, Some(id)).await {
            Ok(true) => errors.add("login", msg_taken("login")),
            Ok(false) => {}
            Err(e) => return store_failure(&e),
        }
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    match state.store.update_user(id, patch).await {
        Ok(Some(user)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data(updated_message(ENTITY), json!(user)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

/// Users sit outside the infraction graph; no guard applies.
pub(crate) async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete_user(id).await {
        Ok(DeleteOutcome::Deleted) => success_response(
            StatusCode::OK,
            SuccessEnvelope::message_only(deleted_message(ENTITY)),
        ),
        Ok(DeleteOutcome::NotFound) => error_response(ApiError::not_found(ENTITY)),
        Ok(DeleteOutcome::Referenced(_)) => {
            error_response(ApiError::internal("user delete cannot be referenced"))
        }
        Err(e) => store_failure(&e),
    }
}
