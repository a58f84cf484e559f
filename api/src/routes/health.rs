//! Health check endpoint.

use actix_web::{web, HttpResponse};
use serde_json::json;
use std::sync::Arc;

use sca_core::services::cache::CacheService;

/// Handler for GET /health
///
/// Reports liveness plus the reachability of the cache backend. A cache
/// outage degrades the status but the process itself is still serving.
pub async fn health(cache: web::Data<Arc<dyn CacheService>>) -> HttpResponse {
    match cache.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "cache": "up",
        })),
        Err(error) => HttpResponse::ServiceUnavailable().json(json!({
            "status": "degraded",
            "cache": error.to_string(),
        })),
    }
}
