use crate::error::StoreError;
use async_trait::async_trait;
use core_types::TradeRecord;
use query::Predicate;
use uuid::Uuid;

/// The record fields a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    EntryDate,
    ExitDate,
    CreatedAt,
    ProfitLoss,
}

/// An ordering over a listing. `descending: true` puts the largest or
/// latest value first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub descending: bool,
}

impl Sort {
    pub fn descending(field: SortField) -> Self {
        Sort {
            field,
            descending: true,
        }
    }

    pub fn ascending(field: SortField) -> Self {
        Sort {
            field,
            descending: false,
        }
    }
}

/// Pagination window applied after filtering and sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    /// No limit means the full remainder.
    pub limit: Option<usize>,
}

impl Page {
    /// The window that returns everything.
    pub fn all() -> Self {
        Page::default()
    }
}

/// The data-store collaborator. Everything above this trait treats
/// persistence as an external concern: implementations may be backed by a
/// database, a remote service, or process memory.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Returns the records matching `predicate`, ordered and windowed.
    /// Insertion order is preserved when no sort is given.
    async fn find_many(
        &self,
        predicate: &Predicate,
        sort: Option<Sort>,
        page: Page,
    ) -> Result<Vec<TradeRecord>, StoreError>;

    /// Counts the records matching `predicate`.
    async fn count_matching(&self, predicate: &Predicate) -> Result<u64, StoreError>;

    async fn insert_one(&self, record: TradeRecord) -> Result<(), StoreError>;

    /// Replaces the record with the given id. The caller is responsible for
    /// having re-validated the replacement.
    async fn update_one(&self, id: Uuid, record: TradeRecord) -> Result<(), StoreError>;

    async fn delete_one(&self, id: Uuid) -> Result<(), StoreError>;
}
