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
use contrav_model::{validate_commune_patch, validate_new_commune};
use contrav_store::DeleteOutcome;
use serde_json::{json, Value};

const ENTITY: EntityKind = EntityKind::Commune;

pub(crate) async fn list(State(state): State<AppState>) -> Response {
    match state.store.list_communes().await {
        Ok(communes) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(communes)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_commune(id).await {
        Ok(Some(commune)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(commune)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn create(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = take_body(body);
    let (draft, errors) = validate_new_commune(&body);
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    let Some(new) = draft.finish() else {
        return error_response(ApiError::internal(
            "commune draft incomplete after validation",
        ));
    };
    match state.store.create_commune(new).await {
        Ok(commune) => success_response(
            StatusCode::CREATED,
            SuccessEnvelope::with_data(created_message(ENTITY), json!(commune)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<Value>>,
) -> Response {
    match state.store.commune_exists(id).await {
        Ok(true) => {}
        Ok(false) => return error_response(ApiError::not_found(ENTITY)),
        Err(e) => return store_failure(&e),
    }
    let body = take_body(body);
    let patch = match validate_commune_patch(&body) {
        Ok(patch) => patch,
        Err(errors) => return error_response(ApiError::validation_failed(errors)),
    };
    match state.store.update_commune(id, patch).await {
        Ok(Some(commune)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data(updated_message(ENTITY), json!(commune)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete_commune(id).await {
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
