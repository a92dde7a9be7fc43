use axum::{response::IntoResponse, Json};

use tarragona_pricing::{DURATION_TIERS, GUEST_TIERS};

/// The step tables behind every quote, so clients never hard-code prices.
pub async fn tiers() -> impl IntoResponse {
    Json(serde_json::json!({
        "guestTiers": GUEST_TIERS,
        "durationTiers": DURATION_TIERS,
    }))
}
