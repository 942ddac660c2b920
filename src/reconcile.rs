// Batch reconciliation: split a mixed batch of drafts into creates and
// updates, with per-record failure visibility

use crate::error::StoreError;
use crate::record::{Record, RecordDraft, RecordId};
use crate::store::RecordStore;
use crate::validate::FieldValidator;
use serde::Serialize;
use std::sync::Arc;

/// One per-record failure inside a batch. `id` is absent for failed creates.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub message: String,
}

/// Outcome of one batch: successes and failures side by side. Partial
/// failure is the normal response shape, not an exception.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub created: Vec<Record>,
    pub updated: Vec<Record>,
    pub errors: Vec<ReconcileError>,
}

impl ReconcileReport {
    /// Every batch entry lands in exactly one of the three buckets.
    pub fn outcome_count(&self) -> usize {
        self.created.len() + self.updated.len() + self.errors.len()
    }
}

/// Converts a batch of drafts into store create/update operations.
///
/// Creates are dispatched before any update: a caller may rely on new rows
/// acquiring identifiers before the update round. Each record is decided
/// individually; there is no rollback across the batch.
pub struct ReconcileEngine {
    store: Arc<dyn RecordStore>,
    validator: FieldValidator,
}

impl ReconcileEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let validator = FieldValidator::new(Arc::clone(&store));
        Self { store, validator }
    }

    pub fn reconcile(&self, batch: &[RecordDraft]) -> Result<ReconcileReport, StoreError> {
        let (new_drafts, existing_drafts): (Vec<&RecordDraft>, Vec<&RecordDraft>) =
            batch.iter().partition(|d| d.is_new);

        let mut report = ReconcileReport::default();

        for draft in new_drafts {
            self.create_one(draft, &mut report)?;
        }
        for draft in existing_drafts {
            self.update_one(draft, &mut report)?;
        }

        log::info!(
            "[Reconcile] batch of {}: {} created, {} updated, {} errors",
            batch.len(),
            report.created.len(),
            report.updated.len(),
            report.errors.len()
        );
        Ok(report)
    }

    fn create_one(
        &self,
        draft: &RecordDraft,
        report: &mut ReconcileReport,
    ) -> Result<(), StoreError> {
        if let Err(validation) = self.validator.validate_for_create(&draft.fields) {
            report.errors.push(ReconcileError {
                id: None,
                message: validation
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            });
            return Ok(());
        }
        match self.store.create(&draft.fields) {
            Ok(record) => report.created.push(record),
            // Uniqueness is time-of-check in the validator: a duplicate
            // within the same batch passes validation and is rejected here.
            Err(StoreError::DuplicateEmail { email }) => report.errors.push(ReconcileError {
                id: None,
                message: format!("email {email} is already in use"),
            }),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn update_one(
        &self,
        draft: &RecordDraft,
        report: &mut ReconcileReport,
    ) -> Result<(), StoreError> {
        let Some(id) = draft.id else {
            report.errors.push(ReconcileError {
                id: None,
                message: "User ID is required".to_string(),
            });
            return Ok(());
        };
        match self.store.find_by_id(id)? {
            Some(_) => {}
            None => {
                report.errors.push(ReconcileError {
                    id: Some(id),
                    message: format!("User with ID {id} not found"),
                });
                return Ok(());
            }
        }
        match self.store.update(id, &draft.fields) {
            Ok(record) => report.updated.push(record),
            Err(StoreError::DuplicateEmail { email }) => report.errors.push(ReconcileError {
                id: Some(id),
                message: format!("email {email} is already in use"),
            }),
            Err(StoreError::NotFound { id }) => report.errors.push(ReconcileError {
                id: Some(id),
                message: format!("User with ID {id} not found"),
            }),
            Err(e) => return Err(e),
        }
        Ok(())
    }
}
