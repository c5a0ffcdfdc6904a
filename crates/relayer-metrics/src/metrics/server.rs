// HTTP endpoint serving the catalog to a Prometheus scraper

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::TEXT_FORMAT;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::catalog::MetricCatalog;
use super::MetricsError;

pub struct MetricsServer {
    listener: TcpListener,
    catalog: Arc<MetricCatalog>,
}

impl MetricsServer {
    /// Bind the listen socket. Failing here should stop the relayer.
    pub async fn bind(addr: SocketAddr, catalog: Arc<MetricCatalog>) -> Result<Self, MetricsError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| MetricsError::Bind { addr, source })?;

        Ok(Self { listener, catalog })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, MetricsError> {
        self.listener.local_addr().map_err(MetricsError::Server)
    }

    /// Serve `/metrics` and `/health` until the listener fails.
    pub async fn run(self) -> Result<(), MetricsError> {
        let addr = self.local_addr()?;
        info!("📊 Metrics server listening on http://{}/metrics", addr);

        axum::serve(self.listener, router(self.catalog))
            .await
            .map_err(MetricsError::Server)
    }
}

fn router(catalog: Arc<MetricCatalog>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(catalog)
}

async fn metrics_handler(State(catalog): State<Arc<MetricCatalog>>) -> Response {
    match catalog.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "OK"
}
