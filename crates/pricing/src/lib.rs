//! Party pricing engine.
//!
//! Pure, deterministic step-table pricing shared by the authoritative create
//! path and the form preview. No IO.

pub mod format;
pub mod tiers;

pub use format::format_amount;
pub use tiers::{
    compute_amounts, duration_fee, guest_unit_price, PartyAmounts, Tier, DURATION_TIERS,
    GUEST_TIERS,
};
