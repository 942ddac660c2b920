// Create, list, and batch-update handlers

use crate::error::StoreError;
use crate::record::{RecordDraft, RecordFields, RecordId};
use crate::server::error::{bad_request, internal_error, validation_failed};
use crate::server::ServerState;
use crate::store::RecordStore;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

pub async fn handle_new_user(
    State(state): State<ServerState>,
    axum::Json(fields): axum::Json<RecordFields>,
) -> impl IntoResponse {
    if let Err(validation) = state.validator.validate_for_create(&fields) {
        return validation_failed(&validation.errors).into_response();
    }

    match state.store.create(&fields) {
        Ok(record) => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "message": "Create user success",
                "result": record,
            })),
        )
            .into_response(),
        // A concurrent create can slip between the validator's lookup and
        // this write; report it like any other validation failure.
        Err(StoreError::DuplicateEmail { .. }) => bad_request("Email is already in use").into_response(),
        Err(e) => {
            log::error!("[Server] create failed: {}", e);
            internal_error("Cannot create your data").into_response()
        }
    }
}

pub async fn handle_get_users(State(state): State<ServerState>) -> impl IntoResponse {
    match state.store.find_all() {
        Ok(records) => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "message": "Get all user success",
                "result": records,
            })),
        )
            .into_response(),
        Err(e) => {
            log::error!("[Server] list failed: {}", e);
            internal_error("Cannot get users data").into_response()
        }
    }
}

/// Wire shape of one batch-update entry. `id` is optional so that a missing
/// identifier is reported per-record instead of failing body parsing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntry {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
}

impl UpdateEntry {
    fn into_draft(self) -> RecordDraft {
        RecordDraft {
            id: self.id,
            is_new: false,
            fields: RecordFields {
                first_name: self.first_name,
                last_name: self.last_name,
                position: self.position,
                phone: self.phone,
                email: self.email,
            },
        }
    }
}

pub async fn handle_update_users(
    State(state): State<ServerState>,
    axum::Json(body): axum::Json<serde_json::Value>,
) -> impl IntoResponse {
    if !body.is_array() {
        return bad_request("Invalid data format").into_response();
    }
    let entries: Vec<UpdateEntry> = match serde_json::from_value(body) {
        Ok(entries) => entries,
        Err(_) => return bad_request("Invalid data format").into_response(),
    };

    let batch: Vec<RecordDraft> = entries.into_iter().map(UpdateEntry::into_draft).collect();
    match state.reconcile.reconcile(&batch) {
        Ok(report) => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "message": "Users updated successfully",
                "result": report.updated,
                "errors": report.errors,
            })),
        )
            .into_response(),
        Err(e) => {
            log::error!("[Server] batch update failed: {}", e);
            internal_error("Cannot update your data").into_response()
        }
    }
}
