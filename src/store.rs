// Record store adapter: the query/command contract issued to persistence,
// plus an in-memory implementation with a JSON seed path

use crate::error::StoreError;
use crate::record::{Record, RecordFields, RecordId};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::RwLock;

/// Free-text filter applied identically to page fetches and counts.
///
/// An empty or absent query matches every record; otherwise a record matches
/// when first name, last name, position, or email contains the query as a
/// case-insensitive substring.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    query: Option<String>,
}

impl SearchFilter {
    pub fn all() -> Self {
        Self { query: None }
    }

    pub fn contains(query: impl Into<String>) -> Self {
        let query: String = query.into();
        if query.is_empty() {
            Self { query: None }
        } else {
            Self {
                query: Some(query.to_lowercase()),
            }
        }
    }

    pub fn from_optional(query: Option<&str>) -> Self {
        match query {
            Some(q) if !q.is_empty() => Self::contains(q),
            _ => Self::all(),
        }
    }

    pub fn matches(&self, fields: &RecordFields) -> bool {
        let Some(q) = &self.query else {
            return true;
        };
        [
            &fields.first_name,
            &fields.last_name,
            &fields.position,
            &fields.email,
        ]
        .iter()
        .any(|f| f.to_lowercase().contains(q.as_str()))
    }
}

/// Contract between the engines and the persistence layer. Injected
/// explicitly into every engine; there is no process-wide store handle.
pub trait RecordStore: Send + Sync {
    /// Create a record, assigning the next identifier. Fails with
    /// `DuplicateEmail` when the email is already stored.
    fn create(&self, fields: &RecordFields) -> Result<Record, StoreError>;

    fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<Record>, StoreError>;

    fn find_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Fetch one offset window in natural (identifier) order. Stable across
    /// calls absent writes.
    fn find_page(
        &self,
        filter: &SearchFilter,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Record>, StoreError>;

    /// Count every record matching `filter`, unaffected by skip/take.
    fn count(&self, filter: &SearchFilter) -> Result<u64, StoreError>;

    /// Rewrite all five fields of an existing record. Fails with `NotFound`
    /// when the id is absent and `DuplicateEmail` when the new email belongs
    /// to a different record.
    fn update(&self, id: RecordId, fields: &RecordFields) -> Result<Record, StoreError>;
}

struct MemoryStoreInner {
    records: BTreeMap<u64, RecordFields>,
    next_id: u64,
}

/// In-memory store keyed by sequential identifier, enforcing the email
/// uniqueness invariant on every write.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Load seed records from a JSON file (an array of field objects) into a
    /// fresh store.
    pub fn load_seed(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path)?;
        let seed: Vec<RecordFields> = serde_json::from_reader(file)?;
        let store = Self::new();
        for fields in &seed {
            store.create(fields)?;
        }
        log::debug!("[Store] Seeded {} records from {}", seed.len(), path.display());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn create(&self, fields: &RecordFields) -> Result<Record, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let duplicate = inner
            .records
            .values()
            .any(|r| r.email.eq_ignore_ascii_case(&fields.email));
        if duplicate {
            return Err(StoreError::DuplicateEmail {
                email: fields.email.clone(),
            });
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.insert(id, fields.clone());
        Ok(Record {
            id: RecordId(id),
            fields: fields.clone(),
        })
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.get(&id.0).map(|fields| Record {
            id,
            fields: fields.clone(),
        }))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Record>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .records
            .iter()
            .find(|(_, r)| r.email.eq_ignore_ascii_case(email))
            .map(|(&id, fields)| Record {
                id: RecordId(id),
                fields: fields.clone(),
            }))
    }

    fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .records
            .iter()
            .map(|(&id, fields)| Record {
                id: RecordId(id),
                fields: fields.clone(),
            })
            .collect())
    }

    fn find_page(
        &self,
        filter: &SearchFilter,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Record>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .records
            .iter()
            .filter(|(_, fields)| filter.matches(fields))
            .skip(skip as usize)
            .take(take as usize)
            .map(|(&id, fields)| Record {
                id: RecordId(id),
                fields: fields.clone(),
            })
            .collect())
    }

    fn count(&self, filter: &SearchFilter) -> Result<u64, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .records
            .values()
            .filter(|fields| filter.matches(fields))
            .count() as u64)
    }

    fn update(&self, id: RecordId, fields: &RecordFields) -> Result<Record, StoreError> {
        let mut inner = self.inner.write().unwrap();
        if !inner.records.contains_key(&id.0) {
            return Err(StoreError::NotFound { id });
        }
        let collision = inner
            .records
            .iter()
            .any(|(&other, r)| other != id.0 && r.email.eq_ignore_ascii_case(&fields.email));
        if collision {
            return Err(StoreError::DuplicateEmail {
                email: fields.email.clone(),
            });
        }
        inner.records.insert(id.0, fields.clone());
        Ok(Record {
            id,
            fields: fields.clone(),
        })
    }
}
