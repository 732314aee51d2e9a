use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    message: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

/// `GET /`
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Jukey API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}
