//! Party records.
//!
//! This crate contains the party booking model and its input rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod form;
pub mod party;

pub use form::{integer_field, text_field, FieldErrors, PartyForm, Preview, MIN_IDENTITY_DIGITS};
pub use party::{NewParty, PartyRecord, PricedParty};
