//! Liveness and readiness probes.
//!
//! Both are stateless: the process has no long-running startup work, so a
//! served request already proves readiness.

use actix_web::{get, HttpResponse};
use serde_json::json;

/// Report process liveness.
#[utoipa::path(
    get,
    path = "/api/v1/health/live",
    responses(
        (status = 200, description = "Process is up")
    ),
    tags = ["health"],
    operation_id = "healthLive",
    security([])
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Report readiness to serve traffic.
#[utoipa::path(
    get,
    path = "/api/v1/health/ready",
    responses(
        (status = 200, description = "Ready to serve")
    ),
    tags = ["health"],
    operation_id = "healthReady",
    security([])
)]
#[get("/health/ready")]
pub async fn ready() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ready" }))
}
