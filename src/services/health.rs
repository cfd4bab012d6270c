use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use crate::services::pending::PendingRegistrations;
use crate::store::{self, JsonStore};
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub store: StoreHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreHealth {
    pub status: String,
    pub users: usize,
    pub bots: usize,
    pub created_total: usize,
    pub pending_registrations: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub pending: PendingRegistrations,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(store: JsonStore, pending: PendingRegistrations) -> Self {
        let state = AppState {
            store,
            pending,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let readable = store_readable(&state.store).await;
    let summary = state.store.read(|s| s.stats_summary()).await;

    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let status = if readable { "healthy" } else { "unhealthy" };
    let health_response = HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: StoreHealth {
            status: status.to_string(),
            users: summary.users_total,
            bots: summary.bots_total,
            created_total: summary.created_total,
            pending_registrations: state.pending.len(),
        },
        uptime_seconds: uptime,
    };

    if readable {
        Ok(Json(health_response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    if store_readable(&state.store).await {
        Ok(Json("ready"))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

/// The file on disk must still parse; a missing file counts as empty.
async fn store_readable(store: &JsonStore) -> bool {
    match store::load(store.path()).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use tempfile::TempDir;

    async fn create_test_health_service() -> (HealthService, JsonStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = JsonStore::open(temp_dir.path().join("data.json"))
            .await
            .expect("Failed to open test store");
        let pending = PendingRegistrations::new();
        pending.begin(5);

        (HealthService::new(store.clone(), pending), store, temp_dir)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (health_service, store, _temp_dir) = create_test_health_service().await;
        store
            .mutate("set_user_bot", |s| s.set_user_bot(1, "1:A", "oneBot", 0).is_ok())
            .await
            .expect("Failed to seed store");
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "healthy");
        assert_eq!(health_response.store.users, 1);
        assert_eq!(health_response.store.bots, 1);
        assert_eq!(health_response.store.created_total, 1);
        assert_eq!(health_response.store.pending_registrations, 1);
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_fails_on_corrupt_file() {
        let (health_service, store, _temp_dir) = create_test_health_service().await;
        std::fs::write(store.path(), "not json").expect("Failed to corrupt store");
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let (health_service, _store, _temp_dir) = create_test_health_service().await;
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let ready_response: String = response.json();
        assert_eq!(ready_response, "ready");
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let (health_service, _store, _temp_dir) = create_test_health_service().await;
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
