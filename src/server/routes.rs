// Route setup and configuration

use crate::reconcile::ReconcileEngine;
use crate::search::SearchEngine;
use crate::server::error::not_found;
use crate::server::{
    handle_paginate::handle_paginate,
    handle_users::{handle_get_users, handle_new_user, handle_update_users},
    ServerConfig, ServerState,
};
use crate::store::RecordStore;
use crate::validate::FieldValidator;
use axum::response::IntoResponse;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub fn create_router(
    store: Arc<dyn RecordStore>,
    config: ServerConfig,
    start_time: Instant,
) -> Router {
    let state = ServerState {
        search: Arc::new(SearchEngine::new(Arc::clone(&store))),
        reconcile: Arc::new(ReconcileEngine::new(Arc::clone(&store))),
        validator: Arc::new(FieldValidator::new(Arc::clone(&store))),
        store,
        config,
        start_time,
    };

    Router::new()
        .route("/new-user", axum::routing::post(handle_new_user))
        .route(
            "/users",
            axum::routing::get(handle_get_users).patch(handle_update_users),
        )
        .route("/paginate", axum::routing::get(handle_paginate))
        .route("/status", axum::routing::get(handle_status))
        .fallback(handle_unmatched)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

async fn handle_status(
    axum::extract::State(state): axum::extract::State<ServerState>,
) -> impl IntoResponse {
    let total = state.store.count(&crate::store::SearchFilter::all()).ok();
    axum::Json(serde_json::json!({
        "server": {
            "version": state.config.version,
            "uptime_seconds": state.start_time.elapsed().as_secs(),
        },
        "records": { "count": total },
    }))
}

async fn handle_unmatched() -> impl IntoResponse {
    not_found("Not Found")
}
