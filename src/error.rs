// Error taxonomy for the store and the engines

use crate::record::RecordId;
use serde::Serialize;
use thiserror::Error;

/// A single failing validation rule, tied to the field it failed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// User-input or business-rule violation. All failing rules are reported
/// together; the request never reaches the store.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: {}", self.summary())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Failures raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's email uniqueness constraint rejected a write.
    #[error("email {email} is already in use")]
    DuplicateEmail { email: String },

    /// An update targeted an identifier that does not exist.
    #[error("User with ID {id} not found")]
    NotFound { id: RecordId },

    #[error("seed file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file is not valid record JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}
