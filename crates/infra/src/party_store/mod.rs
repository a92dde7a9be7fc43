//! Party record store boundary.
//!
//! The service depends only on the `PartyStore` capability; the backing
//! engine is picked at startup.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryPartyStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresPartyStore;
pub use r#trait::{PartyStore, StoreError};

use chrono::{DateTime, SubsecRound, Utc};

/// Microsecond precision, the resolution Postgres `TIMESTAMPTZ` keeps.
///
/// Every store stamps records with this so the record returned by `insert`
/// equals the one read back later.
pub(crate) fn storage_timestamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}
