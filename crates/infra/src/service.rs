//! Party booking operations (application-level orchestration).
//!
//! ```text
//! input ──validate──▶ NewParty ──price──▶ PricedParty ──store.insert──▶ PartyRecord
//! range ──store.query_in_range──▶ [PartyRecord] ──build_report──▶ Report
//! ```
//!
//! This module contains no IO itself; it composes the injected `PartyStore`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use tarragona_core::DomainError;
use tarragona_parties::{NewParty, PartyForm, PartyRecord, Preview};
use tarragona_reporting::{build_report, DateRange, Report};

use crate::party_store::{PartyStore, StoreError};

/// Failure of a party operation.
///
/// `Validation` is client-correctable; `StoreUnavailable` is server-side and
/// is never retried here.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

/// Result of a bulk clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOutcome {
    pub deleted_count: u64,
}

/// Party operations over an injected record store.
#[derive(Debug, Clone)]
pub struct PartyService<S> {
    store: S,
}

impl<S> PartyService<S>
where
    S: PartyStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate, price and persist a new party.
    ///
    /// Nothing is stored when validation fails.
    #[instrument(skip(self, identity), err)]
    pub async fn create_party(
        &self,
        identity: &str,
        guest_count: i64,
        duration_hours: i64,
    ) -> Result<PartyRecord, ServiceError> {
        let party = NewParty::new(identity, guest_count, duration_hours)?;
        self.insert(party).await
    }

    /// Same as [`Self::create_party`] for untyped input (HTTP bodies).
    #[instrument(skip_all, err)]
    pub async fn create_from_form(&self, form: &PartyForm) -> Result<PartyRecord, ServiceError> {
        let party = form.to_new_party()?;
        self.insert(party).await
    }

    async fn insert(&self, party: NewParty) -> Result<PartyRecord, ServiceError> {
        let priced = party.price()?;
        let record = self.store.insert(priced).await?;

        info!(
            party_id = %record.id,
            guests = record.guest_count,
            hours = record.duration_hours,
            total = record.total,
            "party created"
        );
        Ok(record)
    }

    /// Every record, most recent first.
    pub async fn list_parties(&self) -> Result<Vec<PartyRecord>, ServiceError> {
        let records = self.store.list_recent().await?;
        debug!(count = records.len(), "parties listed");
        Ok(records)
    }

    /// Totals and duration histogram over the records created in `range`.
    #[instrument(skip(self), err)]
    pub async fn get_report(&self, range: DateRange) -> Result<Report, ServiceError> {
        let records = self.store.query_in_range(range).await?;
        let report = build_report(&records);
        debug!(parties = report.totals.parties_count, "report built");
        Ok(report)
    }

    /// Irreversibly delete every record.
    #[instrument(skip(self), err)]
    pub async fn clear_all_parties(&self) -> Result<ClearOutcome, ServiceError> {
        let deleted_count = self.store.clear_all().await?;
        warn!(deleted_count, "all parties cleared");
        Ok(ClearOutcome { deleted_count })
    }

    /// Validate and price an unsubmitted form. Never touches the store.
    pub fn preview(&self, form: &PartyForm) -> Preview {
        let preview = form.preview();
        debug!(valid = preview.valid, "party form previewed");
        preview
    }
}
