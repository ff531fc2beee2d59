//! HTTP host for the users server.
//!
//! Wraps module routes with the shared middleware stack (request ids,
//! tracing, error envelopes, panic catching, timeout, CORS, body limit),
//! adds `/health` and serves the result until a shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

pub mod config;
pub mod request_id;
pub mod web;

pub use config::ApiIngressConfig;

/// Owns the HTTP server configuration and assembles the final router.
#[derive(Debug, Clone, Default)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Add `/health` and the fallback to `routes`, then wrap everything in the middleware stack.
    pub fn build_router(&self, routes: Router) -> Router {
        tracing::debug!("Building router");
        let mut router = routes
            .route("/health", get(web::health_check))
            .fallback(web::not_found);

        // Layers added later wrap the earlier ones. From innermost to outermost:
        // BodyLimit -> CORS -> Timeout -> CatchPanic -> ErrorEnvelope -> Trace
        // -> push_req_id_to_extensions -> PropagateRequestId -> SetRequestId
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(self.config.request_timeout_sec),
        ));

        // Panics become a bare 500, which the error layer turns into an envelope
        router = router.layer(CatchPanicLayer::new());

        router = router.layer(from_fn(modkit::error_mapping_middleware));

        router = router.layer(request_id::create_trace_layer());

        router = router.layer(from_fn(request_id::push_req_id_to_extensions));

        let x_request_id = request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        router
    }

    /// Bind `bind_addr` and serve `router` until `shutdown` resolves.
    pub async fn serve<F>(&self, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .config
            .bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.config.bind_addr))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await
            .context("HTTP server failed")
    }
}
