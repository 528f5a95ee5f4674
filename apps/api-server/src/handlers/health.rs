//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::realtime::RealtimeGateway;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub realtime_clients: usize,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(gateway: web::Data<RealtimeGateway>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        realtime_clients: gateway.identified_count().await,
    };

    HttpResponse::Ok().json(response)
}
