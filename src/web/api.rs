use actix_web::{web, HttpResponse, Responder};
use log::error;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Deserialize;
use std::sync::Arc;

use crate::metrics::Metrics;
use crate::monitor::TokenMonitorService;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub address: Option<String>,
}

pub async fn status(
    service: web::Data<Arc<TokenMonitorService>>,
    metrics: web::Data<Arc<Metrics>>,
) -> impl Responder {
    metrics.http_requests.inc();

    HttpResponse::Ok().json(serde_json::json!({
        "status": "running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "initialized": service.is_initialized().await,
        "tokensTracked": service.token_count().await,
    }))
}

pub async fn data(
    service: web::Data<Arc<TokenMonitorService>>,
    metrics: web::Data<Arc<Metrics>>,
) -> impl Responder {
    metrics.http_requests.inc();

    let exported = service.export_all().await;
    match serde_json::to_value(&exported) {
        Ok(value) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": value,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            error!("Failed to serialize store export: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string(),
            }))
        }
    }
}

pub async fn token(
    service: web::Data<Arc<TokenMonitorService>>,
    metrics: web::Data<Arc<Metrics>>,
    query: web::Query<TokenQuery>,
) -> impl Responder {
    metrics.http_requests.inc();

    let address = match query.address.as_deref() {
        Some(address) if !address.is_empty() => address,
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Token address required",
            }))
        }
    };

    match service.export_token(address).await {
        Some(view) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": view,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "Token not found",
        })),
    }
}

pub async fn refresh(
    service: web::Data<Arc<TokenMonitorService>>,
    metrics: web::Data<Arc<Metrics>>,
) -> impl Responder {
    metrics.http_requests.inc();

    service.refresh_all().await;
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Data refreshed successfully",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn metrics_text(registry: web::Data<Arc<Registry>>) -> impl Responder {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    match encoder.encode(&registry.gather(), &mut buffer) {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to encode metrics",
            }))
        }
    }
}
