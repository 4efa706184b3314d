//! Liveness endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /`: service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        message: "周易占卜服务运行中",
        version: crate::config::APP_VERSION,
    })
}

/// `GET /api/health`: connection check.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
