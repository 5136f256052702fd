use std::collections::HashMap;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

use ars_core::models::risk::RiskRecord;

use crate::error::StorageError;
use crate::BoxFuture;

/// Inclusive calendar-date window over `created_at`, evaluated in UTC.
/// An open end matches everything on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn contains(&self, at: Timestamp) -> bool {
        let day = at.to_zoned(TimeZone::UTC).date();
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }
}

pub trait RiskRecordStore: Send + Sync {
    fn insert(&self, record: RiskRecord) -> BoxFuture<'_, Result<RiskRecord, StorageError>>;

    fn get(&self, id: Uuid) -> BoxFuture<'_, Result<Option<RiskRecord>, StorageError>>;

    /// Records inside `range`, newest first.
    fn list(&self, range: DateRange) -> BoxFuture<'_, Result<Vec<RiskRecord>, StorageError>>;
}

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<Uuid, RiskRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RiskRecordStore for MemoryRecordStore {
    fn insert(&self, record: RiskRecord) -> BoxFuture<'_, Result<RiskRecord, StorageError>> {
        Box::pin(async move {
            let mut records = self.records.write().await;
            if records.contains_key(&record.id) {
                return Err(StorageError::Conflict(format!(
                    "risk record {} already exists",
                    record.id
                )));
            }
            records.insert(record.id, record.clone());
            Ok(record)
        })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, Result<Option<RiskRecord>, StorageError>> {
        Box::pin(async move { Ok(self.records.read().await.get(&id).cloned()) })
    }

    fn list(&self, range: DateRange) -> BoxFuture<'_, Result<Vec<RiskRecord>, StorageError>> {
        Box::pin(async move {
            let mut matching: Vec<RiskRecord> = self
                .records
                .read()
                .await
                .values()
                .filter(|r| range.contains(r.created_at))
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(matching)
        })
    }
}
