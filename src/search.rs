// Search and pagination engine

use crate::error::ValidationError;
use crate::record::PageResult;
use crate::store::{RecordStore, SearchFilter};
use std::sync::Arc;

/// Default page size of the paginate endpoint.
pub const DEFAULT_PAGE_LIMIT: u64 = 8;

/// Failures of a search call: bad pagination parameters or a store failure.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] crate::error::StoreError),
}

/// Turns a free-text query plus pagination parameters into a deterministic,
/// countable result set. The same filter drives both the page fetch and the
/// total count, so the two can never diverge.
pub struct SearchEngine {
    store: Arc<dyn RecordStore>,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Fetch one page. `page` and `limit` are 1-based and must be positive;
    /// zero is rejected rather than clamped. A page past the end returns an
    /// empty sequence with the correct total.
    pub fn search(
        &self,
        query: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<PageResult, SearchError> {
        if page == 0 {
            return Err(ValidationError::single("page", "page must be >= 1").into());
        }
        if limit == 0 {
            return Err(ValidationError::single("limit", "limit must be >= 1").into());
        }

        let filter = SearchFilter::from_optional(query);
        let skip = (page - 1).saturating_mul(limit);
        let records = self.store.find_page(&filter, skip, limit)?;
        let total = self.store.count(&filter)?;
        let total_pages = total.div_ceil(limit);

        log::debug!(
            "[Search] query={:?} page={} limit={} -> {} rows, total {}",
            query,
            page,
            limit,
            records.len(),
            total
        );

        Ok(PageResult {
            records,
            total,
            total_pages,
            page,
            limit,
        })
    }
}
