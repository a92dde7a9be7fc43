use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use tarragona_parties::PartyForm;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_party).get(list_parties).delete(clear_parties))
        .route("/report", get(get_report))
        .route("/preview", post(preview_party))
}

pub async fn create_party(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<PartyForm>,
) -> axum::response::Response {
    match services.parties.create_from_form(&body).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_parties(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.parties.list_parties().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_report(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ReportQuery>,
) -> axum::response::Response {
    let range = match query.to_range() {
        Ok(range) => range,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.parties.get_report(range).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn clear_parties(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.parties.clear_all_parties().await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn preview_party(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<PartyForm>,
) -> impl IntoResponse {
    Json(services.parties.preview(&body))
}
