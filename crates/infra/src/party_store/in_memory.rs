use std::sync::RwLock;

use async_trait::async_trait;

use tarragona_core::{Clock, PartyId, SystemClock};
use tarragona_parties::{PartyRecord, PricedParty};
use tarragona_reporting::DateRange;

use super::r#trait::{PartyStore, StoreError};
use super::storage_timestamp;

/// In-memory party store.
///
/// Intended for tests/dev. Records are kept in insertion order; listings
/// apply a stable sort on `created_at` so ties keep that order.
#[derive(Debug)]
pub struct InMemoryPartyStore<C = SystemClock> {
    rows: RwLock<Vec<PartyRecord>>,
    clock: C,
}

impl InMemoryPartyStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryPartyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryPartyStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            clock,
        }
    }

    fn snapshot(
        &self,
        operation: &'static str,
        keep: impl Fn(&PartyRecord) -> bool,
    ) -> Result<Vec<PartyRecord>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::unavailable(operation, "lock poisoned"))?;

        let mut out: Vec<PartyRecord> = rows.iter().filter(|r| keep(r)).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}

#[async_trait]
impl<C: Clock> PartyStore for InMemoryPartyStore<C> {
    async fn insert(&self, party: PricedParty) -> Result<PartyRecord, StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::unavailable("insert", "lock poisoned"))?;

        let record = party.into_record(PartyId::new(), storage_timestamp(self.clock.now()));
        rows.push(record.clone());
        Ok(record)
    }

    async fn list_recent(&self) -> Result<Vec<PartyRecord>, StoreError> {
        self.snapshot("list_recent", |_| true)
    }

    async fn query_in_range(&self, range: DateRange) -> Result<Vec<PartyRecord>, StoreError> {
        self.snapshot("query_in_range", |r| range.contains(r.created_at))
    }

    async fn clear_all(&self) -> Result<u64, StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::unavailable("clear_all", "lock poisoned"))?;

        let deleted = rows.len() as u64;
        rows.clear();
        Ok(deleted)
    }
}
