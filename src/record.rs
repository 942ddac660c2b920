// Record data model shared by the store, the engines, and the HTTP surface

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned record identifier. Assigned once at creation, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The five mutable text fields of a record. Wire names are camelCase; a
/// field missing from a request body deserializes as empty and is caught by
/// validation rather than body parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFields {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
}

impl RecordFields {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A stored record: identifier plus fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: RecordFields,
}

/// A client-held draft, tagged new or existing. A new draft carries no id;
/// an existing draft must carry one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl RecordDraft {
    pub fn new(fields: RecordFields) -> Self {
        Self {
            id: None,
            is_new: true,
            fields,
        }
    }

    pub fn existing(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id: Some(id),
            is_new: false,
            fields,
        }
    }
}

/// One page of search results plus count metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub records: Vec<Record>,
    pub total: u64,
    pub total_pages: u64,
    pub page: u64,
    pub limit: u64,
}
