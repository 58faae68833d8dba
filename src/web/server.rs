use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use log::info;
use prometheus::Registry;
use std::path::PathBuf;
use std::sync::Arc;

use crate::metrics::Metrics;
use crate::monitor::TokenMonitorService;
use crate::web::static_files::StaticRoot;
use crate::web::{api, static_files};

pub struct WebServer {
    service: Arc<TokenMonitorService>,
    metrics: Arc<Metrics>,
    registry: Arc<Registry>,
    static_root: PathBuf,
}

impl WebServer {
    pub fn new(
        service: Arc<TokenMonitorService>,
        metrics: Arc<Metrics>,
        registry: Arc<Registry>,
        static_root: PathBuf,
    ) -> Self {
        Self {
            service,
            metrics,
            registry,
            static_root,
        }
    }

    /// Binds and returns the server future; the caller drives it and owns
    /// shutdown via its handle.
    pub fn start(&self, host: &str, port: u16) -> std::io::Result<Server> {
        info!("Starting web server on {}:{}", host, port);

        let service = self.service.clone();
        let metrics = self.metrics.clone();
        let registry = self.registry.clone();
        let static_root = StaticRoot(self.static_root.clone());

        let server = HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(service.clone()))
                .app_data(web::Data::new(metrics.clone()))
                .app_data(web::Data::new(registry.clone()))
                .app_data(web::Data::new(static_root.clone()))
                .route("/api/status", web::get().to(api::status))
                .route("/api/data", web::get().to(api::data))
                .route("/api/token", web::get().to(api::token))
                .route("/api/refresh", web::get().to(api::refresh))
                .route("/metrics", web::get().to(api::metrics_text))
                .default_service(web::route().to(static_files::asset))
        })
        .bind((host, port))?
        .run();

        Ok(server)
    }
}
