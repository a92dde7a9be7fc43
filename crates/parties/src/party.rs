use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tarragona_core::{DomainError, DomainResult, PartyId};
use tarragona_pricing::{compute_amounts, PartyAmounts};

/// Validated request to book a party. Amounts are not part of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParty {
    identity: String,
    guest_count: u32,
    duration_hours: u32,
}

impl NewParty {
    /// Validate raw counts. Values below 1 or beyond `u32` are rejected, never clamped.
    pub fn new(
        identity: impl Into<String>,
        guest_count: i64,
        duration_hours: i64,
    ) -> DomainResult<Self> {
        let identity = identity.into().trim().to_string();
        if identity.is_empty() {
            return Err(DomainError::validation("identity is required"));
        }

        Ok(Self {
            identity,
            guest_count: positive_count("guestCount", guest_count)?,
            duration_hours: positive_count("durationHours", duration_hours)?,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }

    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    /// Attach the authoritative amounts.
    pub fn price(self) -> DomainResult<PricedParty> {
        let amounts = compute_amounts(self.guest_count, self.duration_hours)?;
        Ok(PricedParty {
            party: self,
            amounts,
        })
    }
}

pub(crate) fn positive_count(field: &str, value: i64) -> DomainResult<u32> {
    if value < 1 {
        return Err(DomainError::validation(format!("{field} must be at least 1")));
    }
    u32::try_from(value).map_err(|_| DomainError::validation(format!("{field} is too large")))
}

/// A validated party with its computed amounts, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedParty {
    pub party: NewParty,
    pub amounts: PartyAmounts,
}

impl PricedParty {
    /// Materialize the stored record once the store has assigned id and timestamp.
    pub fn into_record(self, id: PartyId, created_at: DateTime<Utc>) -> PartyRecord {
        PartyRecord {
            id,
            identity: self.party.identity,
            guest_count: self.party.guest_count,
            duration_hours: self.party.duration_hours,
            guest_amount: self.amounts.guest_amount,
            duration_amount: self.amounts.duration_amount,
            total: self.amounts.total,
            created_at,
        }
    }
}

/// Stored party billing entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRecord {
    pub id: PartyId,
    pub identity: String,
    pub guest_count: u32,
    pub duration_hours: u32,
    pub guest_amount: u64,
    pub duration_amount: u64,
    pub total: u64,
    pub created_at: DateTime<Utc>,
}

impl PartyRecord {
    pub fn amounts(&self) -> PartyAmounts {
        PartyAmounts {
            guest_amount: self.guest_amount,
            duration_amount: self.duration_amount,
            total: self.total,
        }
    }
}
