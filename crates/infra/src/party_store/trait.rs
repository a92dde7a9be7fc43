use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use tarragona_parties::{PartyRecord, PricedParty};
use tarragona_reporting::DateRange;

/// Record store failure.
///
/// Opaque to callers: the store could not complete the operation. Never
/// retried internally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable during {operation}: {reason}")]
    Unavailable {
        operation: &'static str,
        reason: String,
    },
}

impl StoreError {
    pub fn unavailable(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            operation,
            reason: reason.into(),
        }
    }
}

/// Narrow persistence capability consumed by the party service.
///
/// Implementations assign the record id and `created_at` on insert. Every
/// listing is ordered by `created_at` descending; records with equal
/// timestamps keep insertion order.
#[async_trait]
pub trait PartyStore: Send + Sync {
    /// Persist a priced party and return the stored record.
    async fn insert(&self, party: PricedParty) -> Result<PartyRecord, StoreError>;

    /// All records, most recent first.
    async fn list_recent(&self) -> Result<Vec<PartyRecord>, StoreError>;

    /// Records whose `created_at` falls in `range`, most recent first.
    async fn query_in_range(&self, range: DateRange) -> Result<Vec<PartyRecord>, StoreError>;

    /// Delete every record. Returns how many were removed (0 on an empty store).
    async fn clear_all(&self) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> PartyStore for Arc<S>
where
    S: PartyStore + ?Sized,
{
    async fn insert(&self, party: PricedParty) -> Result<PartyRecord, StoreError> {
        (**self).insert(party).await
    }

    async fn list_recent(&self) -> Result<Vec<PartyRecord>, StoreError> {
        (**self).list_recent().await
    }

    async fn query_in_range(&self, range: DateRange) -> Result<Vec<PartyRecord>, StoreError> {
        (**self).query_in_range(range).await
    }

    async fn clear_all(&self) -> Result<u64, StoreError> {
        (**self).clear_all().await
    }
}
