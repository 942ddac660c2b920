// Client grid state: an editable in-memory mirror of one fetched page
//
// Pure state machine, no I/O. The rendering layer feeds user actions in and
// reads rows, sort markers, and per-row errors back out.

mod debounce;

pub use debounce::{SearchDebouncer, DEFAULT_DEBOUNCE_DELAY, MIN_QUERY_LEN};

use crate::record::{Record, RecordDraft, RecordFields};
use crate::validate::email_is_valid;
use std::collections::HashMap;

/// Stable local identity of a grid row. Survives sorting and reordering, so
/// error associations never drift to the wrong row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

/// Editable columns of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridField {
    FirstName,
    LastName,
    Position,
    Phone,
    Email,
}

/// Columns that support sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    FirstName,
    LastName,
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Token tying an in-flight page fetch to the grid generation that issued
/// it. A stale token's result is discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Aggregate outcome of the last save; the grid does not surface per-row
/// save errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveNotice {
    Saved,
    Failed,
}

#[derive(Debug, Clone)]
pub struct GridRow {
    pub row_id: RowId,
    pub draft: RecordDraft,
}

pub struct GridState {
    rows: Vec<GridRow>,
    errors: HashMap<RowId, HashMap<&'static str, String>>,
    sort: Option<(SortColumn, SortOrder)>,
    next_row_id: u64,
    latest_fetch: u64,
    notice: Option<SaveNotice>,
}

impl GridState {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            errors: HashMap::new(),
            sort: None,
            next_row_id: 0,
            latest_fetch: 0,
            notice: None,
        }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn sort(&self) -> Option<(SortColumn, SortOrder)> {
        self.sort
    }

    pub fn notice(&self) -> Option<SaveNotice> {
        self.notice
    }

    /// UI error for one row and field, if any.
    pub fn field_error(&self, row_id: RowId, field: &str) -> Option<&str> {
        self.errors
            .get(&row_id)?
            .get(field)
            .map(|s| s.as_str())
    }

    fn fresh_row_id(&mut self) -> RowId {
        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        id
    }

    /// Start a page fetch; the returned token marks it as the most recent.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.latest_fetch += 1;
        FetchToken(self.latest_fetch)
    }

    /// Install a fetched page. Returns false (and changes nothing) when the
    /// token has been superseded by a later `begin_fetch`.
    pub fn apply_page(&mut self, token: FetchToken, records: Vec<Record>) -> bool {
        if token.0 != self.latest_fetch {
            log::debug!("[Grid] discarding stale page (token {})", token.0);
            return false;
        }
        let mut rows = Vec::with_capacity(records.len());
        for rec in records {
            let row_id = self.fresh_row_id();
            rows.push(GridRow {
                row_id,
                draft: RecordDraft::existing(rec.id, rec.fields),
            });
        }
        self.rows = rows;
        self.errors.clear();
        true
    }

    /// Prepend a blank new-record row and return its identity.
    pub fn add_row(&mut self) -> RowId {
        let row_id = self.fresh_row_id();
        self.rows.insert(
            0,
            GridRow {
                row_id,
                draft: RecordDraft::new(RecordFields::empty()),
            },
        );
        row_id
    }

    /// Replace one field of one row. Editing never blocks; an email edit
    /// immediately re-checks syntax and uniqueness against the other rows
    /// and records or clears a UI-only error.
    pub fn edit_field(&mut self, row_id: RowId, field: GridField, value: impl Into<String>) {
        let value: String = value.into();
        let Some(row) = self.rows.iter_mut().find(|r| r.row_id == row_id) else {
            return;
        };
        Self::set_field(&mut row.draft.fields, field, value.clone());
        if field == GridField::Email {
            self.check_email(row_id, &value);
        }
    }

    fn set_field(fields: &mut RecordFields, field: GridField, value: String) {
        match field {
            GridField::FirstName => fields.first_name = value,
            GridField::LastName => fields.last_name = value,
            GridField::Position => fields.position = value,
            GridField::Phone => fields.phone = value,
            GridField::Email => fields.email = value,
        }
    }

    fn check_email(&mut self, row_id: RowId, email: &str) {
        let taken = self
            .rows
            .iter()
            .any(|r| r.row_id != row_id && r.draft.fields.email == email);

        let message = if !email_is_valid(email) {
            Some("Invalid email format")
        } else if taken {
            Some("Email already exists")
        } else {
            None
        };

        match message {
            Some(msg) => {
                self.errors
                    .entry(row_id)
                    .or_default()
                    .insert("email", msg.to_string());
            }
            None => {
                if let Some(row_errors) = self.errors.get_mut(&row_id) {
                    row_errors.remove("email");
                    if row_errors.is_empty() {
                        self.errors.remove(&row_id);
                    }
                }
            }
        }
    }

    /// Toggle sorting on a column: ascending first, descending on repeat;
    /// any other column's sort is reset. Comparison is lexicographic on the
    /// column text.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        let order = match self.sort {
            Some((active, SortOrder::Ascending)) if active == column => SortOrder::Descending,
            _ => SortOrder::Ascending,
        };
        self.sort = Some((column, order));

        let key = |row: &GridRow| -> String {
            match column {
                SortColumn::FirstName => row.draft.fields.first_name.clone(),
                SortColumn::LastName => row.draft.fields.last_name.clone(),
                SortColumn::Position => row.draft.fields.position.clone(),
            }
        };
        match order {
            SortOrder::Ascending => self.rows.sort_by_key(key),
            SortOrder::Descending => {
                self.rows.sort_by(|a, b| key(b).cmp(&key(a)));
            }
        }
    }

    /// Snapshot the grid as a reconciliation batch, top to bottom.
    pub fn snapshot(&self) -> Vec<RecordDraft> {
        self.rows.iter().map(|r| r.draft.clone()).collect()
    }

    /// Record the aggregate outcome of a save round-trip.
    pub fn apply_save_outcome(&mut self, ok: bool) {
        self.notice = Some(if ok {
            SaveNotice::Saved
        } else {
            SaveNotice::Failed
        });
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;

    fn record(id: u64, first: &str, email: &str) -> Record {
        Record {
            id: RecordId(id),
            fields: RecordFields {
                first_name: first.to_string(),
                last_name: "L".to_string(),
                position: "P".to_string(),
                phone: "1".to_string(),
                email: email.to_string(),
            },
        }
    }

    fn loaded_grid() -> GridState {
        let mut grid = GridState::new();
        let token = grid.begin_fetch();
        grid.apply_page(
            token,
            vec![
                record(1, "Carol", "carol@x.com"),
                record(2, "Alice", "alice@x.com"),
                record(3, "Bob", "bob@x.com"),
            ],
        );
        grid
    }

    #[test]
    fn add_row_prepends_a_blank_new_draft() {
        let mut grid = loaded_grid();
        let row_id = grid.add_row();
        assert_eq!(grid.rows().len(), 4);
        assert_eq!(grid.rows()[0].row_id, row_id);
        assert!(grid.rows()[0].draft.is_new);
        assert!(grid.rows()[0].draft.id.is_none());
    }

    #[test]
    fn email_edit_flags_bad_format_then_clears() {
        let mut grid = loaded_grid();
        let row_id = grid.rows()[0].row_id;
        grid.edit_field(row_id, GridField::Email, "nope");
        assert_eq!(grid.field_error(row_id, "email"), Some("Invalid email format"));
        grid.edit_field(row_id, GridField::Email, "fine@x.com");
        assert_eq!(grid.field_error(row_id, "email"), None);
    }

    #[test]
    fn email_edit_flags_duplicates_against_other_rows_only() {
        let mut grid = loaded_grid();
        let row_id = grid.rows()[0].row_id;
        grid.edit_field(row_id, GridField::Email, "alice@x.com");
        assert_eq!(grid.field_error(row_id, "email"), Some("Email already exists"));
        // re-entering the row's own current value is not a duplicate
        grid.edit_field(row_id, GridField::Email, "carol@x.com");
        assert_eq!(grid.field_error(row_id, "email"), None);
    }

    #[test]
    fn error_follows_the_row_through_a_sort() {
        let mut grid = loaded_grid();
        let flagged = grid.rows()[0].row_id; // Carol
        grid.edit_field(flagged, GridField::Email, "broken");
        grid.toggle_sort(SortColumn::FirstName);
        // Carol sorted to the bottom; the error stays with her row identity
        assert_eq!(grid.rows()[2].row_id, flagged);
        assert_eq!(grid.field_error(flagged, "email"), Some("Invalid email format"));
    }

    #[test]
    fn sort_cycles_and_is_exclusive() {
        let mut grid = loaded_grid();
        grid.toggle_sort(SortColumn::FirstName);
        assert_eq!(grid.sort(), Some((SortColumn::FirstName, SortOrder::Ascending)));
        let names: Vec<_> = grid
            .rows()
            .iter()
            .map(|r| r.draft.fields.first_name.clone())
            .collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);

        grid.toggle_sort(SortColumn::FirstName);
        assert_eq!(grid.sort(), Some((SortColumn::FirstName, SortOrder::Descending)));
        assert_eq!(grid.rows()[0].draft.fields.first_name, "Carol");

        // switching column resets the previous one and starts ascending
        grid.toggle_sort(SortColumn::Position);
        assert_eq!(grid.sort(), Some((SortColumn::Position, SortOrder::Ascending)));
    }

    #[test]
    fn stale_fetch_results_are_discarded() {
        let mut grid = GridState::new();
        let first = grid.begin_fetch();
        let second = grid.begin_fetch();
        assert!(!grid.apply_page(first, vec![record(1, "Old", "old@x.com")]));
        assert!(grid.rows().is_empty());
        assert!(grid.apply_page(second, vec![record(2, "New", "new@x.com")]));
        assert_eq!(grid.rows().len(), 1);
    }

    #[test]
    fn snapshot_preserves_order_and_flags() {
        let mut grid = loaded_grid();
        let row_id = grid.add_row();
        grid.edit_field(row_id, GridField::Email, "new@x.com");
        let batch = grid.snapshot();
        assert_eq!(batch.len(), 4);
        assert!(batch[0].is_new);
        assert_eq!(batch[0].fields.email, "new@x.com");
        assert!(!batch[1].is_new);
        assert_eq!(batch[1].id, Some(RecordId(1)));
    }

    #[test]
    fn save_outcome_is_a_single_aggregate_notice() {
        let mut grid = loaded_grid();
        assert_eq!(grid.notice(), None);
        grid.apply_save_outcome(true);
        assert_eq!(grid.notice(), Some(SaveNotice::Saved));
        grid.apply_save_outcome(false);
        assert_eq!(grid.notice(), Some(SaveNotice::Failed));
    }
}
