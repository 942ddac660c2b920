// src/lib.rs
//
// rostergrid: a small record-management service. The library holds the
// search/pagination engine, the batch reconciliation engine, the field
// validator, the record store contract with its in-memory adapter, the
// client grid state, and the HTTP surface tying the server-side pieces
// together.

pub mod error;
pub mod grid;
pub mod reconcile;
pub mod record;
pub mod search;
pub mod server;
pub mod store;
pub mod validate;

pub use error::{FieldError, StoreError, ValidationError};
pub use reconcile::{ReconcileEngine, ReconcileError, ReconcileReport};
pub use record::{PageResult, Record, RecordDraft, RecordFields, RecordId};
pub use search::SearchEngine;
pub use store::{MemoryStore, RecordStore, SearchFilter};
pub use validate::FieldValidator;
