use std::sync::Arc;

use tarragona_infra::{Config, InMemoryPartyStore, PartyService, PartyStore, StoreBackend};

#[cfg(feature = "postgres")]
use tarragona_infra::party_store::PostgresPartyStore;

/// Store handle shared by every request.
pub type SharedPartyStore = Arc<dyn PartyStore>;

/// Everything the handlers need, built once at startup.
pub struct AppServices {
    pub parties: PartyService<SharedPartyStore>,
    backend: &'static str,
}

impl AppServices {
    pub fn new(store: SharedPartyStore, backend: &'static str) -> Self {
        Self {
            parties: PartyService::new(store),
            backend,
        }
    }

    /// Volatile in-process storage (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPartyStore::new()), "in_memory")
    }

    /// Name of the backing store, for logs and `/health`.
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

pub async fn build_services(config: &Config) -> anyhow::Result<AppServices> {
    let services = match config.store_backend() {
        StoreBackend::InMemory => AppServices::in_memory(),
        StoreBackend::Postgres { database_url } => build_persistent_services(&database_url).await?,
    };

    tracing::info!(backend = services.backend(), "party store ready");
    Ok(services)
}

#[cfg(feature = "postgres")]
async fn build_persistent_services(database_url: &str) -> anyhow::Result<AppServices> {
    let store = PostgresPartyStore::connect(database_url).await?;
    Ok(AppServices::new(Arc::new(store), "postgres"))
}

#[cfg(not(feature = "postgres"))]
async fn build_persistent_services(_database_url: &str) -> anyhow::Result<AppServices> {
    tracing::warn!("DATABASE_URL set but postgres feature not enabled, falling back to in-memory");
    Ok(AppServices::in_memory())
}
