// SPDX-License-Identifier: Apache-2.0

//! Infraction handlers. The four foreign keys are probed against their
//! target tables after shape validation so a dangling id comes back as a 400
//! field error alongside whatever else failed.

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
use contrav_model::{validate_infraction_patch, validate_new_infraction};
use contrav_store::{DeleteOutcome, Store};
use serde_json::{json, Value};

const ENTITY: EntityKind = EntityKind::Infraction;

async fn probe_parents(
    store: &Store,
    commune_id: Option<i64>,
    violant_id: Option<i64>,
    agent_id: Option<i64>,
    categorie_id: Option<i64>,
    errors: &mut FieldErrors,
) -> Result<(), Response> {
    if let Some(id) = commune_id {
        match store.commune_exists(id).await {
            Ok(false) => errors.add("commune_id", msg_exists("commune_id")),
            Ok(true) => {}
            Err(e) => return Err(store_failure(&e)),
        }
    }
    if let Some(id) = violant_id {
        match store.violant_exists(id).await {
            Ok(false) => errors.add("violant_id", msg_exists("violant_id")),
            Ok(true) => {}
            Err(e) => return Err(store_failure(&e)),
        }
    }
    if let Some(id) = agent_id {
        match store.agent_exists(id).await {
            Ok(false) => errors.add("agent_id", msg_exists("agent_id")),
            Ok(true) => {}
            Err(e) => return Err(store_failure(&e)),
        }
    }
    if let Some(id) = categorie_id {
        match store.categorie_exists(id).await {
            Ok(false) => errors.add("categorie_id", msg_exists("categorie_id")),
            Ok(true) => {}
            Err(e) => return Err(store_failure(&e)),
        }
    }
    Ok(())
}

pub(crate) async fn list(State(state): State<AppState>) -> Response {
    match state.store.list_infractions().await {
        Ok(infractions) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(infractions)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_infraction(id).await {
        Ok(Some(infraction)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data("Success", json!(infraction)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn create(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = take_body(body);
    let (draft, mut errors) = validate_new_infraction(&body);
    if let Err(resp) = probe_parents(
        &state.store,
        draft.commune_id,
        draft.violant_id,
        draft.agent_id,
        draft.categorie_id,
        &mut errors,
    )
    .await
    {
        return resp;
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    let Some(new) = draft.finish() else {
        return error_response(ApiError::internal(
            "infraction draft incomplete after validation",
        ));
    };
    match state.store.create_infraction(new).await {
        Ok(infraction) => success_response(
            StatusCode::CREATED,
            SuccessEnvelope::with_data(created_message(ENTITY), json!(infraction)),
        ),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<Value>>,
) -> Response {
    match state.store.infraction_exists(id).await {
        Ok(true) => {}
        Ok(false) => return error_response(ApiError::not_found(ENTITY)),
        Err(e) => return store_failure(&e),
    }
    let body = take_body(body);
    let patch = match validate_infraction_patch(&body) {
        Ok(patch) => patch,
        Err(errors) => return error_response(ApiError::validation_failed(errors)),
    };
    let mut errors = FieldErrors::new();
    if let Err(resp) = probe_parents(
        &state.store,
        patch.commune_id,
        patch.violant_id,
        patch.agent_id,
        patch.categorie_id,
        &mut errors,
    )
    .await
    {
        return resp;
    }
    if !errors.is_empty() {
        return error_response(ApiError::validation_failed(errors));
    }
    match state.store.update_infraction(id, patch).await {
        Ok(Some(infraction)) => success_response(
            StatusCode::OK,
            SuccessEnvelope::with_data(updated_message(ENTITY), json!(infraction)),
        ),
        Ok(None) => error_response(ApiError::not_found(ENTITY)),
        Err(e) => store_failure(&e),
    }
}

pub(crate) async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete_infraction(id).await {
        Ok(DeleteOutcome::Deleted) => success_response(
            StatusCode::OK,
            SuccessEnvelope::message_only(deleted_message(ENTITY)),
        ),
        Ok(DeleteOutcome::NotFound) => error_response(ApiError::not_found(ENTITY)),
        Ok(DeleteOutcome::Referenced(decision_id)) => error_response(ApiError::referenced_by(
            ENTITY,
            EntityKind::Decision,
            decision_id,
        )),
        Err(e) => store_failure(&e),
    }
}
