use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::state::registry::ScheduleRegistry;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub scheduler: SchedulerHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchedulerHealth {
    pub users: usize,
    pub scheduled_reminders: usize,
    pub pending_confirmations: usize,
}

#[derive(Clone)]
struct AppState {
    registry: Arc<Mutex<ScheduleRegistry>>,
    start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(registry: Arc<Mutex<ScheduleRegistry>>) -> Self {
        let state = AppState {
            registry,
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
    let stats = {
        let registry = state.registry.lock().await;
        registry.stats()
    };
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        scheduler: SchedulerHealth {
            users: stats.users,
            scheduled_reminders: stats.scheduled_reminders,
            pending_confirmations: stats.pending_confirmations,
        },
        uptime_seconds: uptime,
    }))
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    // Ready once the registry lock is reachable; there is no database.
    let _ = state.registry.lock().await;
    Ok(Json("ready"))
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Weekday;

    use crate::schedule::{ShiftKind, ShiftSpec};

    fn create_test_health_service() -> (HealthService, Arc<Mutex<ScheduleRegistry>>) {
        let registry = Arc::new(Mutex::new(ScheduleRegistry::default()));
        (HealthService::new(registry.clone()), registry)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (health_service, _registry) = create_test_health_service();
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "healthy");
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(health_response.scheduler.users, 0);
        assert_eq!(health_response.scheduler.scheduled_reminders, 0);
    }

    #[tokio::test]
    async fn test_health_reports_registry_stats() {
        let (health_service, registry) = create_test_health_service();
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        {
            let mut reg = registry.lock().await;
            reg.replace_shifts(7, vec![ShiftSpec::new(Weekday::Sun, ShiftKind::Morning)]);
        }

        let response = server.get("/health").await;
        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.scheduler.users, 1);
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let (health_service, _registry) = create_test_health_service();
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let ready_response: String = response.json();
        assert_eq!(ready_response, "ready");
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let (health_service, _registry) = create_test_health_service();
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
