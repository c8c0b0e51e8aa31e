#![forbid(unsafe_code)]
//! HTTP server for the contrav registry. Seven resources share one handler
//! shape: validate the body, probe uniqueness/existence against the store,
//! write, wrap in the response envelope. Deletes go through the referential
//! guard in the store.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use contrav_store::Store;
use std::sync::Arc;

mod config;
mod http;

pub use config::{validate_startup_config_contract, ApiConfig};

pub const CRATE_NAME: &str = "contrav-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub api: ApiConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<Store>, api: ApiConfig) -> Self {
        Self { store, api }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.api.max_body_bytes;
    Router::new()
        .route("/api/test", get(http::probes::test_handler))
        .route("/healthz", get(http::probes::healthz_handler))
        .route(
            "/api/agent",
            get(http::agents::list).post(http::agents::create),
        )
        .route(
            "/api/agent/:id",
            get(http::agents::show)
                .put(http::agents::update)
                .delete(http::agents::destroy),
        )
        .route(
            "/api/categorie",
            get(http::categories::list).post(http::categories::create),
        )
        .route(
            "/api/categorie/:id",
            get(http::categories::show)
                .put(http::categories::update)
                .delete(http::categories::destroy),
        )
        .route(
            "/api/commune",
            get(http::communes::list).post(http::communes::create),
        )
        .route(
            "/api/commune/:id",
            get(http::communes::show)
                .put(http::communes::update)
                .delete(http::communes::destroy),
        )
        .route(
            "/api/decision",
            get(http::decisions::list).post(http::decisions::create),
        )
        .route(
            "/api/decision/:id",
            get(http::decisions::show)
                .put(http::decisions::update)
                .delete(http::decisions::destroy),
        )
        .route(
            "/api/infraction",
            get(http::infractions::list).post(http::infractions::create),
        )
        .route(
            "/api/infraction/:id",
            get(http::infractions::show)
                .put(http::infractions::update)
                .delete(http::infractions::destroy),
        )
        .route("/api/user", get(http::users::list).post(http::users::create))
        .route(
            "/api/user/:id",
            get(http::users::show)
                .put(http::users::update)
                .delete(http::users::destroy),
        )
        .route(
            "/api/violant",
            get(http::violants::list).post(http::violants::create),
        )
        .route(
            "/api/violant/:id",
            get(http::violants::show)
                .put(http::violants::update)
                .delete(http::violants::destroy),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
