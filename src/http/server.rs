//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the comparison handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a listener until shutdown is triggered

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::directions::DirectionsProvider;
use crate::http::handlers::{self, AppState};
use crate::lifecycle::Shutdown;
use crate::session::ComparisonSession;

/// HTTP front end for one comparison session.
pub struct ComparatorServer {
    router: Router,
}

impl ComparatorServer {
    pub fn new<P: DirectionsProvider>(
        session: Arc<ComparisonSession<P>>,
        config: &ServerConfig,
    ) -> Self {
        let router = build_router(
            AppState { session },
            Duration::from_secs(config.request_timeout_secs),
        );
        Self { router }
    }

    /// The fully layered router, for driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` is triggered, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router<P: DirectionsProvider>(state: AppState<P>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::health::<P>))
        .route("/api/state", get(handlers::current_state::<P>))
        .route("/api/compare", post(handlers::compare::<P>))
        .route("/api/reset", post(handlers::reset::<P>))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
