use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{error, warn};
use std::path::{Path, PathBuf};

/// Root directory static assets are served from.
#[derive(Debug, Clone)]
pub struct StaticRoot(pub PathBuf);

/// Serves dashboard assets. `/` maps to `index.html`; anything resolving
/// outside the serving root is rejected.
pub async fn asset(req: HttpRequest, root: web::Data<StaticRoot>) -> impl Responder {
    let rel = req.path().trim_start_matches('/');
    let rel = if rel.is_empty() { "index.html" } else { rel };

    let root_dir = match root.0.canonicalize() {
        Ok(dir) => dir,
        Err(e) => {
            warn!("Static root {:?} unavailable: {}", root.0, e);
            return HttpResponse::NotFound()
                .content_type("text/plain")
                .body("File not found");
        }
    };

    let candidate = match root_dir.join(rel).canonicalize() {
        Ok(path) => path,
        Err(_) => {
            return HttpResponse::NotFound()
                .content_type("text/plain")
                .body("File not found")
        }
    };

    if !candidate.starts_with(&root_dir) {
        warn!("Rejected path traversal attempt: {}", req.path());
        return HttpResponse::Forbidden()
            .content_type("text/plain")
            .body("Forbidden");
    }

    match tokio::fs::read(&candidate).await {
        Ok(body) => HttpResponse::Ok()
            .content_type(mime_type(&candidate))
            .body(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HttpResponse::NotFound()
            .content_type("text/plain")
            .body("File not found"),
        Err(e) => {
            error!("Failed to read {:?}: {}", candidate, e);
            HttpResponse::InternalServerError()
                .content_type("text/plain")
                .body("Internal server error")
        }
    }
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
