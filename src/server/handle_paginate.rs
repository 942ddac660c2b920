// Paginated search handler

use crate::search::{SearchError, DEFAULT_PAGE_LIMIT};
use crate::server::error::{internal_error, validation_failed};
use crate::server::ServerState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct PaginateQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

pub async fn handle_paginate(
    State(state): State<ServerState>,
    Query(params): Query<PaginateQuery>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let query = params.search.as_deref();

    match state.search.search(query, page, limit) {
        Ok(result) => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "result": result.records,
                "total": result.total,
                "totalPages": result.total_pages,
                "page": result.page,
                "limit": result.limit,
            })),
        )
            .into_response(),
        Err(SearchError::Invalid(validation)) => {
            validation_failed(&validation.errors).into_response()
        }
        Err(SearchError::Store(e)) => {
            log::error!("[Server] paginate failed: {}", e);
            internal_error("Cannot fetch your data").into_response()
        }
    }
}
