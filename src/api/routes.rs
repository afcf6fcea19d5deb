use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers::{
    admin::trigger_update,
    standings::{get_prediction, get_snapshots, get_standings},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/standings", get(get_standings))
        .route("/api/snapshots", get(get_snapshots))
        .route("/api/predict", get(get_prediction))
        .route("/api/update", post(trigger_update))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::{self, setup::initialize_database, snapshots};
    use crate::engine::{AdjacencyMap, SecondDegreeMode, TeamSnapshot};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn test_state(name: &str) -> Arc<AppState> {
        let path = std::env::temp_dir()
            .join(format!("league_routes_{}_{}.db", name, std::process::id()));
        let _ = std::fs::remove_file(&path);

        let pool = database::create_pool(path.to_str().unwrap()).unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        initialize_database(&mut conn).unwrap();

        let rows = vec![
            TeamSnapshot {
                team: "Boston Celtics".to_string(),
                wins: 3,
                losses: 0,
                second_degree: 9,
                third_degree: 12,
            },
            TeamSnapshot {
                team: "Utah Jazz".to_string(),
                wins: 0,
                losses: 3,
                second_degree: 3,
                third_degree: 9,
            },
        ];
        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let adjacency = AdjacencyMap::new();
        snapshots::insert_snapshot(&mut conn, day, SecondDegreeMode::AllGames, 3, &rows, &adjacency)
            .unwrap();

        Arc::new(AppState {
            pool,
            config: AppConfig::new(),
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_standings_endpoint() {
        let app = create_router(test_state("standings"));
        let (status, body) = get_json(app, "/api/standings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["asOfDate"], "2025-01-02");
        assert_eq!(body["secondDegreeMode"], "all-games");
        assert_eq!(body["teams"][0]["team"], "Boston Celtics");
    }

    #[tokio::test]
    async fn test_standings_for_missing_date() {
        let app = create_router(test_state("standings_missing"));
        let (status, _) = get_json(app, "/api/standings?date=2025-03-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_snapshots_endpoint() {
        let app = create_router(test_state("snapshots"));
        let (status, body) = get_json(app, "/api/snapshots").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["gamesCounted"], 3);
    }

    #[tokio::test]
    async fn test_predict_endpoint() {
        let app = create_router(test_state("predict"));
        let (status, body) = get_json(app, "/api/predict?home=UTA&visitor=BOS").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"]["team"], "Boston Celtics");
        assert_eq!(body["prediction"]["confidence"], 0.75);
    }

    #[tokio::test]
    async fn test_update_requires_token() {
        let app = create_router(test_state("update_auth"));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/update")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
