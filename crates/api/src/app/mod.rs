//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the shared party service
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and query parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tarragona_infra::Config;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router around already-wired services.
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Pick the record store from `config` and build the router (entrypoint used by `main.rs`).
pub async fn build_app_from_config(config: &Config) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(build_app(Arc::new(services)))
}
