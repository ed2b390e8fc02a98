//! Route Comparator
//!
//! Compares two driving routes between fixed endpoints that differ only in a
//! required waypoint, and reports which one is faster.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /api/compare  ──▶ http ──▶ session ──▶ health gate
//!   (or --once)                        │
//!                                      ▼
//!                                 comparison ──┬──▶ directions (waypoint A)
//!                                      │       └──▶ directions (waypoint B)
//!                                      ▼
//!                                 best route ──▶ map ──▶ presenter / GET /api/state
//!
//!   Cross-cutting: config (+ hot reload), resilience, observability, lifecycle
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use route_comparator::comparison::{Palette, RouteComparator};
use route_comparator::config::{default_config, load_config, ComparatorConfig, ConfigWatcher};
use route_comparator::directions::GoogleDirectionsProvider;
use route_comparator::health::{ReadinessGate, ReadinessMonitor};
use route_comparator::http::ComparatorServer;
use route_comparator::lifecycle::{shutdown_on_signal, Shutdown};
use route_comparator::map::StaticMapRenderer;
use route_comparator::observability::{logging, metrics};
use route_comparator::session::{ComparisonSession, ConsolePresenter, LogPresenter, Presenter};

#[derive(Parser)]
#[command(name = "route-comparator")]
#[command(about = "Compare two driving routes and pick the faster one", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults are used without one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single comparison, print both panels and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("route-comparator v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        origin = %config.route.origin,
        destination = %config.route.destination,
        first_waypoint = %config.route.first_waypoint,
        second_waypoint = %config.route.second_waypoint,
        api_key_set = !config.provider.api_key.is_empty(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    shutdown_on_signal(shutdown.clone());

    let provider = Arc::new(GoogleDirectionsProvider::new(&config.provider)?);
    let gate = Arc::new(ReadinessGate::new(Duration::from_secs(
        config.readiness.timeout_secs,
    )));
    let monitor = ReadinessMonitor::from_config(provider.clone(), gate.clone(), &config.readiness);
    let monitor_task = tokio::spawn(monitor.run(shutdown.subscribe()));

    let presenter: Arc<dyn Presenter> = if cli.once {
        Arc::new(ConsolePresenter)
    } else {
        Arc::new(LogPresenter)
    };
    let session = Arc::new(build_session(&config, provider, gate, presenter));

    if cli.once {
        let state = monitor_task.await?;
        tracing::debug!(provider = ?state, "Readiness settled");
        let result = session.request_comparison().await;
        shutdown.trigger();
        result?;
        return Ok(());
    }

    tokio::spawn(session.clone().clear_loading_notice_when_ready());

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Keep the watcher handle alive for the life of the server.
    let _watcher = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            match watcher.run() {
                Ok(handle) => {
                    tokio::spawn(
                        session
                            .clone()
                            .follow_config_updates(updates, shutdown.subscribe()),
                    );
                    Some(handle)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Config hot reload disabled");
                    None
                }
            }
        }
        None => None,
    };

    let server = ComparatorServer::new(session, &config.server);
    server.run(listener, shutdown.clone()).await?;

    shutdown.trigger();
    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_session(
    config: &ComparatorConfig,
    provider: Arc<GoogleDirectionsProvider>,
    gate: Arc<ReadinessGate>,
    presenter: Arc<dyn Presenter>,
) -> ComparisonSession<GoogleDirectionsProvider> {
    let palette = Palette {
        best: config.display.best_color.clone(),
        alternate: config.display.alternate_color.clone(),
    };
    let comparator = RouteComparator::new(
        provider,
        Duration::from_secs(config.provider.request_timeout_secs),
        palette,
    );
    let session = ComparisonSession::new(
        comparator,
        gate,
        config.route.clone(),
        config.retries.clone(),
        presenter,
    );

    if !config.map.enabled {
        return session;
    }
    match StaticMapRenderer::new(&config.map, &config.provider.api_key) {
        Ok(renderer) => session.with_map_renderer(Arc::new(renderer)),
        Err(e) => {
            tracing::warn!(error = %e, "Map rendering disabled");
            session
        }
    }
}
