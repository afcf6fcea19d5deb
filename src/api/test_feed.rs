use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::AppConfig;

type Months = Arc<Mutex<HashMap<String, Value>>>;

/// Schedule feed served from a local port; months not set serve `[]`
pub struct TestFeed {
    months: Months,
    url_template: String,
}

impl TestFeed {
    pub async fn start() -> Self {
        let months = Months::default();
        let app = Router::new()
            .route("/schedule/:year/:file", get(serve_month))
            .with_state(months.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            months,
            url_template: format!("http://{}/schedule/{{year}}/{{month}}.json", addr),
        }
    }

    pub fn set_month(&self, year: i32, month: &str, rows: Value) {
        self.months
            .lock()
            .unwrap()
            .insert(format!("{}/{}.json", year, month), rows);
    }

    /// Config pointed at this feed, with its own database and cache under the temp dir
    pub fn config(&self, name: &str) -> AppConfig {
        let base =
            std::env::temp_dir().join(format!("league_feed_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&base);
        std::fs::create_dir_all(&base).unwrap();

        let mut config = AppConfig::new();
        config.source.schedule_url_template = self.url_template.clone();
        config.source.rate_limit_ms = 0;
        config.storage.database_path = base.join("league.db").to_string_lossy().to_string();
        config.storage.cache_dir = base.join("cache").to_string_lossy().to_string();
        config.storage.backtest_dir = base.join("backtest").to_string_lossy().to_string();
        config
    }
}

async fn serve_month(
    State(months): State<Months>,
    Path((year, file)): Path<(String, String)>,
) -> Json<Value> {
    let rows = months.lock().unwrap().get(&format!("{}/{}", year, file)).cloned();
    Json(rows.unwrap_or_else(|| Value::Array(Vec::new())))
}
