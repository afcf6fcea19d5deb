use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::services::update::UpdateService;

use super::{AppState, UpdateParams};

pub fn is_authorized(headers: &HeaderMap, token: &str) -> bool {
    let expected = format!("Bearer {}", token);
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|value| value == expected)
}

pub async fn trigger_update(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UpdateParams>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !is_authorized(&headers, &state.config.server.admin_token) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let config = state.config.clone();
    tokio::spawn(async move {
        log::info!("Admin triggered update started");
        let today = chrono::Local::now().date_naive();
        match UpdateService::new(config, params.force).run(today).await {
            Ok(outcome) => log::info!(
                "Admin triggered update finished with snapshot {}",
                outcome.snapshot().id
            ),
            Err(e) => log::error!("Update failed: {:?}", e),
        }
    });

    (StatusCode::ACCEPTED, "Update triggered").into_response()
}
