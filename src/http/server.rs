//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Dispatch requests to the dev proxy or the SPA layer
//! - Observability (metrics, request IDs)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::DevServerConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::spa::SpaService;
use crate::observability::metrics;
use crate::profile::{DeploymentProfile, ProfileError};
use crate::proxy::{Forwarder, ProxyTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProxyTable>,
    pub forwarder: Forwarder,
    pub spa: SpaService,
}

/// HTTP server for local development of the runner UI.
pub struct DevServer {
    router: Router,
    config: DevServerConfig,
    profile: DeploymentProfile,
}

impl DevServer {
    /// Create a new dev server for the active profile of `config`.
    pub fn new(config: DevServerConfig) -> Result<Self, ProfileError> {
        let profile = DeploymentProfile::active(&config)?;

        let state = AppState {
            proxy: Arc::clone(profile.proxy()),
            forwarder: Forwarder::new(&config.timeouts),
            spa: SpaService::new(
                &config.static_files,
                profile.history().clone(),
                Arc::clone(profile.routes()),
            ),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            profile,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DevServerConfig, state: AppState) -> Router {
        Router::new().fallback(dispatch).with_state(state).layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            profile = %self.profile.name(),
            base = %self.profile.history().base(),
            history = ?self.profile.history().kind(),
            "HTTP server starting"
        );
        for rule in self.profile.proxy().rules() {
            tracing::info!(prefix = %rule.prefix(), target = %rule.target(), "Proxy rule active");
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DevServerConfig {
        &self.config
    }

    pub fn profile(&self) -> &DeploymentProfile {
        &self.profile
    }
}

/// Forward proxied prefixes to the backend; everything else goes to the app.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let Some(rule) = state.proxy.find(&path) else {
        let response = state.spa.serve(request).await;
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            "Served app request"
        );
        metrics::record_request(&method, response.status().as_u16(), "app", start_time);
        return response;
    };

    let client_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        target = %rule.target(),
        "Proxying request"
    );

    let response = match state.forwarder.forward(rule, request, client_addr).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Upstream error");
            e.into_response()
        }
    };

    let status = response.status().as_u16();
    tracing::info!(
        request_id = %request_id,
        "{} {} {}",
        method,
        path,
        status
    );
    metrics::record_request(&method, status, rule.target(), start_time);
    response
}
