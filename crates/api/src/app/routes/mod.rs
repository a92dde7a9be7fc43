use axum::{routing::get, Router};

pub mod parties;
pub mod pricing;
pub mod system;

/// Router for every endpoint under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/parties", parties::router())
        .route("/pricing", get(pricing::tiers))
}
