// Field validation for record creation

use crate::error::{FieldError, ValidationError};
use crate::record::RecordFields;
use crate::store::RecordStore;
use regex::Regex;
use std::sync::{Arc, OnceLock};

// local@domain.tld shape, no whitespace or extra @ allowed
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Returns true when `email` has a plausible local@domain.tld shape.
pub fn email_is_valid(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Pre-create validation: required fields, email syntax, and
/// email-uniqueness-at-submission-time against the store.
pub struct FieldValidator {
    store: Arc<dyn RecordStore>,
}

impl FieldValidator {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Evaluate every rule independently and report all failures together.
    /// A draft that fails here must never reach the store.
    ///
    /// The uniqueness rule is time-of-check: two drafts in the same batch can
    /// both pass it, and the store's own constraint catches the second.
    pub fn validate_for_create(&self, fields: &RecordFields) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if fields.email.is_empty() {
            errors.push(FieldError::new("email", "Please input an email"));
        } else if !email_is_valid(&fields.email) {
            errors.push(FieldError::new("email", "Format email is wrong"));
        } else if self.email_in_use(&fields.email) {
            errors.push(FieldError::new("email", "Email is already in use"));
        }

        if fields.first_name.is_empty() {
            errors.push(FieldError::new("firstName", "Please input your name"));
        }
        if fields.last_name.is_empty() {
            errors.push(FieldError::new("lastName", "Please input your name"));
        }
        if fields.position.is_empty() {
            errors.push(FieldError::new("position", "Please input your position"));
        }
        if fields.phone.is_empty() {
            errors.push(FieldError::new("phone", "Please input your phone"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }

    fn email_in_use(&self, email: &str) -> bool {
        match self.store.find_by_email(email) {
            Ok(existing) => existing.is_some(),
            Err(e) => {
                // Treat a store failure during the lookup as "unknown": let
                // the create itself surface the real error.
                log::warn!("[Validate] email lookup failed: {}", e);
                false
            }
        }
    }
}
