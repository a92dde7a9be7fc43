//! Infrastructure layer: record storage, configuration, service wiring.

pub mod config;
pub mod party_store;
pub mod service;

pub use config::{Config, LogFormat, StoreBackend};
pub use party_store::{InMemoryPartyStore, PartyStore, StoreError};
pub use service::{ClearOutcome, PartyService, ServiceError};
