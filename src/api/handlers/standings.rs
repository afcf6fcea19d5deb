use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::api::models::{ErrorResponse, SnapshotListItem, StandingsResponse};
use crate::database::{snapshots, DbConn, SnapshotWithRows};
use crate::services::prediction::predict_from_latest;

use super::{AppState, PredictParams, StandingsParams};

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

fn connection(state: &AppState) -> Result<DbConn, Response> {
    state
        .pool
        .get()
        .map_err(|_| error_response(StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error"))
}

pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StandingsParams>,
) -> impl IntoResponse {
    let mut conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    let result = match params.date {
        Some(date) => snapshots::find_by_date(&mut conn, date).and_then(|found| {
            found
                .map(|snapshot| {
                    snapshots::load_rows(&mut conn, snapshot.id)
                        .map(|rows| SnapshotWithRows { snapshot, rows })
                })
                .transpose()
        }),
        None => snapshots::load_latest(&mut conn),
    };

    match result {
        Ok(Some(standings)) => Json(StandingsResponse::from(standings)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "No snapshot found"),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)),
    }
}

pub async fn get_snapshots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    match snapshots::list_snapshots(&mut conn) {
        Ok(list) => {
            let items: Vec<SnapshotListItem> =
                list.into_iter().map(SnapshotListItem::from).collect();
            Json(items).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)),
    }
}

pub async fn get_prediction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictParams>,
) -> impl IntoResponse {
    let mut conn = match connection(&state) {
        Ok(conn) => conn,
        Err(response) => return response,
    };

    match predict_from_latest(&mut conn, &params.home, &params.visitor) {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(StatusCode::NOT_FOUND, e.to_string()),
    }
}
