//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::observability::RequestId;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: String,
    pub timestamp: String,
    pub request_id: String,
}

/// Health check endpoint - returns server and database status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>, request_id: RequestId) -> HttpResponse {
    let database_ok = match state.db.main.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            false
        }
    };

    let response = HealthResponse {
        status: if database_ok { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: format!("{:?}", state.db.backend()),
        timestamp: chrono::Utc::now().to_rfc3339(),
        request_id: request_id.as_str().to_string(),
    };

    if database_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
