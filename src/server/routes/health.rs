//! Health monitor control endpoints
//!
//! Liveness and build metadata for the service itself, plus the provider
//! health report and the operations that drive the monitor.

use crate::core::health::{CircuitBreakerState, CircuitState};
use crate::core::providers::ProviderKind;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::HealthError;
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, info};

/// Configure health routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/providers", web::get().to(provider_report))
            .route(
                "/providers/{provider}/check",
                web::post().to(check_provider),
            )
            .route(
                "/providers/{provider}/circuit/reset",
                web::post().to(reset_circuit),
            )
            .route("/monitor/start", web::post().to(start_monitor))
            .route("/monitor/stop", web::post().to(stop_monitor)),
    )
    .route("/version", web::get().to(version_info));
}

/// Liveness of the service itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    pub version: Cow<'static, str>,
    pub monitor_running: bool,
}

/// Build metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub name: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub build_time: Cow<'static, str>,
    pub git_hash: Cow<'static, str>,
    pub rust_version: Cow<'static, str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorQuery {
    pub actor_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRequest {
    pub actor_id: Option<String>,
}

/// Scheduler state after a start or stop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorState {
    pub running: bool,
    pub actor_id: Option<String>,
}

/// Breaker state after an administrative reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitReset {
    pub provider: ProviderKind,
    pub state: CircuitState,
    pub circuit: CircuitBreakerState,
}

/// Basic health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    HttpResponse::Ok().json(ApiResponse::success(ServiceHealth {
        status: Cow::Borrowed("healthy"),
        timestamp: Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        monitor_running: state.monitor.is_running(),
    }))
}

/// Version information endpoint
pub async fn version_info() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(VersionInfo {
        name: Cow::Borrowed(env!("CARGO_PKG_NAME")),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    }))
}

async fn provider_report(state: web::Data<AppState>) -> HttpResponse {
    let report = state.monitor.get_health_report().await;
    HttpResponse::Ok().json(ApiResponse::success(report))
}

async fn check_provider(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ActorQuery>,
) -> Result<HttpResponse, HealthError> {
    let provider: ProviderKind = path.parse()?;
    let actor_id = query
        .into_inner()
        .actor_id
        .unwrap_or_else(|| state.default_actor().to_string());

    info!(provider = %provider, actor_id = %actor_id, "On-demand health check requested");
    let outcome = state.monitor.check_provider_health(provider, &actor_id).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome)))
}

async fn reset_circuit(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, HealthError> {
    let provider: ProviderKind = path.parse()?;
    state.monitor.reset_circuit_breaker(provider);

    let circuit = state.monitor.registry().breaker().snapshot(provider);
    Ok(HttpResponse::Ok().json(ApiResponse::success(CircuitReset {
        provider,
        state: circuit.state(),
        circuit,
    })))
}

async fn start_monitor(
    state: web::Data<AppState>,
    body: Option<web::Json<StartRequest>>,
) -> HttpResponse {
    let actor_id = body
        .and_then(|b| b.into_inner().actor_id)
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| state.default_actor().to_string());

    if state.monitor.start(actor_id) {
        HttpResponse::Ok().json(ApiResponse::success(MonitorState {
            running: true,
            actor_id: state.monitor.running_actor(),
        }))
    } else {
        ApiResponse::<()>::error("Health monitor is already running".to_string())
            .to_http_response()
    }
}

async fn stop_monitor(state: web::Data<AppState>) -> HttpResponse {
    if state.monitor.stop().await {
        HttpResponse::Ok().json(ApiResponse::success(MonitorState {
            running: false,
            actor_id: None,
        }))
    } else {
        ApiResponse::<()>::error("Health monitor is not running".to_string()).to_http_response()
    }
}
