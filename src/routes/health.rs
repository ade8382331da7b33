use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::db;
use crate::models::DatabaseReport;
use crate::state::AppState;

const MAX_REPORTED_COLLECTIONS: u32 = 10;
const MAX_ERROR_CHARS: usize = 80;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: i64,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "QED Express API running" }))
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    (StatusCode::OK, Json(response))
}

/// GET /test - Report database connectivity. Always 200; problems are
/// described in the body.
pub async fn test_database(State(state): State<AppState>) -> Json<DatabaseReport> {
    let mut report = DatabaseReport::default();

    let Ok(pool) = state.pool() else {
        return Json(report);
    };

    report.database = "✅ Available".to_string();
    report.database_url = Some(if state.database_url_set() { "✅ Set" } else { "❌ Not Set" });
    report.database_name = Some(match db::database_name(pool).await {
        Ok(Some(name)) => name,
        Ok(None) => "unknown".to_string(),
        Err(e) => {
            tracing::warn!("Failed to read database name: {}", e);
            "unknown".to_string()
        }
    });

    match db::collection_names(pool, MAX_REPORTED_COLLECTIONS).await {
        Ok(names) => {
            report.collections = names;
            report.connection_status = "Connected";
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            tracing::error!("Database check failed: {}", e);
            let message: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            report.database = format!("⚠️ Connected but Error: {}", message);
        }
    }

    Json(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, app_without_database, get, post_json};

    #[tokio::test]
    async fn root_reports_running() {
        let app = app_without_database();
        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], json!("QED Express API running"));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app_without_database();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));
    }

    #[tokio::test]
    async fn test_endpoint_without_database() {
        let app = app_without_database();
        let (status, body) = get(&app, "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], json!("✅ Running"));
        assert_eq!(body["database"], json!("❌ Not Available"));
        assert_eq!(body["connection_status"], json!("Not Connected"));
        assert_eq!(body["database_url"], Value::Null);
        assert_eq!(body["collections"], json!([]));
    }

    #[tokio::test]
    async fn test_endpoint_lists_collections() {
        let app = app().await;
        let (status, _) = post_json(
            &app,
            "/api/trophy-orders",
            &json!({"quantity": 12, "delivery_address": "1 Main St"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get(&app, "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], json!("✅ Connected & Working"));
        assert_eq!(body["connection_status"], json!("Connected"));
        assert_eq!(body["database_url"], json!("❌ Not Set"));
        assert_eq!(body["database_name"], json!("unknown"));
        assert_eq!(body["collections"], json!(["trophyorder"]));
    }

    #[tokio::test]
    async fn test_endpoint_survives_broken_store() {
        let pool = db::memory_pool().await;
        sqlx::query("DROP TABLE documents").execute(&pool).await.unwrap();
        let app = crate::routes::router(AppState::new(Some(pool), true));

        let (status, body) = get(&app, "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connection_status"], json!("Not Connected"));
        assert_eq!(body["database_url"], json!("✅ Set"));
        let database = body["database"].as_str().unwrap();
        assert!(database.starts_with("⚠️ Connected but Error: "));
    }
}
