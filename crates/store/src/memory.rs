use crate::error::StoreError;
use crate::interface::{Page, Sort, SortField, TradeStore};
use async_trait::async_trait;
use core_types::TradeRecord;
use query::Predicate;
use std::cmp::Ordering;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The in-memory reference implementation of `TradeStore`.
///
/// Filtering, sorting and pagination all happen in-process over a plain
/// record vector, which doubles as the proof that no analytics operation
/// depends on store-side grouping. Used by the CLI and throughout the
/// test suites.
#[derive(Debug, Default)]
pub struct MemoryTradeStore {
    records: RwLock<Vec<TradeRecord>>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-seeds the store, preserving the given order.
    pub async fn seed(&self, records: impl IntoIterator<Item = TradeRecord>) {
        let mut guard = self.records.write().await;
        guard.extend(records);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn compare(a: &TradeRecord, b: &TradeRecord, sort: Sort) -> Ordering {
    let ordering = match sort.field {
        SortField::EntryDate => a.entry_date.cmp(&b.entry_date),
        SortField::ExitDate => a.exit_date.cmp(&b.exit_date),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::ProfitLoss => a.profit_loss.cmp(&b.profit_loss),
    };
    if sort.descending {
        ordering.reverse()
    } else {
        ordering
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn find_many(
        &self,
        predicate: &Predicate,
        sort: Option<Sort>,
        page: Page,
    ) -> Result<Vec<TradeRecord>, StoreError> {
        let guard = self.records.read().await;
        let mut matching: Vec<TradeRecord> = guard
            .iter()
            .filter(|record| predicate.matches(record))
            .cloned()
            .collect();

        if let Some(sort) = sort {
            matching.sort_by(|a, b| compare(a, b, sort));
        }

        let windowed: Vec<TradeRecord> = match page.limit {
            Some(limit) => matching.into_iter().skip(page.skip).take(limit).collect(),
            None => matching.into_iter().skip(page.skip).collect(),
        };
        Ok(windowed)
    }

    async fn count_matching(&self, predicate: &Predicate) -> Result<u64, StoreError> {
        let guard = self.records.read().await;
        Ok(guard.iter().filter(|record| predicate.matches(record)).count() as u64)
    }

    async fn insert_one(&self, record: TradeRecord) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        tracing::debug!(trade_id = %record.id, "inserting trade record");
        guard.push(record);
        Ok(())
    }

    async fn update_one(&self, id: Uuid, record: TradeRecord) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        match guard.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete_one(&self, id: Uuid) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        let before = guard.len();
        guard.retain(|record| record.id != id);
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
