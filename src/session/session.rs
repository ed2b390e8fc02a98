//! The comparison session: explicit context for one running front-end.

use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::Instrument;
use uuid::Uuid;

use crate::comparison::types::waypoint_label;
use crate::comparison::{CompareError, ComparisonOutcome, RouteComparator, Side};
use crate::config::{ComparatorConfig, RetryConfig, RouteConfig};
use crate::directions::DirectionsProvider;
use crate::health::{ReadinessGate, ReadinessState};
use crate::map::{MapRenderer, MapRoute, MapView};
use crate::observability::metrics;
use crate::resilience::retry_with_backoff;
use crate::session::event::ComparisonEvent;
use crate::session::presenter::Presenter;

/// Holds everything a comparison needs and the state the presentation layer
/// shows. Shared behind an `Arc` by the HTTP handlers and the config reloader.
pub struct ComparisonSession<P> {
    comparator: RouteComparator<P>,
    gate: Arc<ReadinessGate>,
    route: ArcSwap<RouteConfig>,
    retries: RetryConfig,
    presenter: Arc<dyn Presenter>,
    map: Option<Arc<dyn MapRenderer>>,
    in_flight: AtomicBool,
    current: ArcSwap<ComparisonEvent>,
}

/// Owned by the comparison task. Clears the in-flight flag however the task
/// ends, and replaces a stranded `Loading` with a failure if it never finished.
struct InFlightGuard<P: DirectionsProvider> {
    session: Arc<ComparisonSession<P>>,
    finished: bool,
}

impl<P: DirectionsProvider> Drop for InFlightGuard<P> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::error!("Comparison ended without a result");
            metrics::record_comparison("interrupted");
            self.session
                .emit(ComparisonEvent::failed(&CompareError::Interrupted));
        }
        self.session.in_flight.store(false, Ordering::Release);
    }
}

impl<P: DirectionsProvider> ComparisonSession<P> {
    pub fn new(
        comparator: RouteComparator<P>,
        gate: Arc<ReadinessGate>,
        route: RouteConfig,
        retries: RetryConfig,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            comparator,
            gate,
            route: ArcSwap::from_pointee(route),
            retries,
            presenter,
            map: None,
            in_flight: AtomicBool::new(false),
            current: ArcSwap::from_pointee(ComparisonEvent::Idle),
        }
    }

    /// Draw the winning route with `renderer` after each successful comparison.
    pub fn with_map_renderer(mut self, renderer: Arc<dyn MapRenderer>) -> Self {
        self.map = Some(renderer);
        self
    }

    pub fn gate(&self) -> &Arc<ReadinessGate> {
        &self.gate
    }

    pub fn route(&self) -> Arc<RouteConfig> {
        self.route.load_full()
    }

    /// What the presentation layer should currently show.
    pub fn current(&self) -> Arc<ComparisonEvent> {
        self.current.load_full()
    }

    pub fn is_comparing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one comparison for the current route configuration.
    ///
    /// A request made while another is in flight is ignored: it returns
    /// [`CompareError::InProgress`], emits nothing, and makes no provider
    /// calls. The current event stays `Loading`.
    ///
    /// The comparison itself runs on a spawned task, so dropping the returned
    /// future (client gone, request timeout) does not stop it from publishing
    /// `Result` or `Failed`.
    pub async fn request_comparison(self: &Arc<Self>) -> Result<ComparisonOutcome, CompareError> {
        if let Err(e) = self.gate.check() {
            tracing::warn!(error = %e, "Comparison requested before provider is ready");
            metrics::record_comparison("not_ready");
            self.emit(ComparisonEvent::failed(&e));
            return Err(e);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Comparison already in flight; ignoring request");
            return Err(CompareError::InProgress);
        }
        let mut guard = InFlightGuard {
            session: Arc::clone(self),
            finished: false,
        };

        let route = self.route.load_full();
        self.emit(ComparisonEvent::Loading {
            first_label: waypoint_label(&route.first_waypoint),
            second_label: waypoint_label(&route.second_waypoint),
        });

        let span = tracing::info_span!("comparison", id = %Uuid::new_v4());
        let task = tokio::spawn(
            async move {
                let result = guard.session.run_comparison(&route).await;
                guard.finished = true;
                result
            }
            .instrument(span),
        );

        match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Comparison task failed");
                Err(CompareError::Interrupted)
            }
        }
    }

    async fn run_comparison(&self, route: &RouteConfig) -> Result<ComparisonOutcome, CompareError> {
        let comparator = &self.comparator;
        let result = retry_with_backoff(
            &self.retries,
            move |attempt| {
                tracing::debug!(attempt, "Comparing routes");
                comparator.compare_routes(
                    &route.origin,
                    &route.destination,
                    &route.first_waypoint,
                    &route.second_waypoint,
                )
            },
            CompareError::is_retryable,
        )
        .await;

        match result {
            Ok(outcome) => {
                metrics::record_comparison(match outcome.better.side {
                    Side::First => "best_first",
                    Side::Second => "best_second",
                });
                let map = self.render_map(&outcome);
                self.emit(ComparisonEvent::Result {
                    outcome: outcome.clone(),
                    map,
                });
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error calculating routes");
                metrics::record_comparison("failed");
                self.emit(ComparisonEvent::failed(&e));
                Err(e)
            }
        }
    }

    /// User dismissal: back to idle. A running comparison is not cancelled
    /// and will still publish its result.
    pub fn reset(&self) {
        self.emit(ComparisonEvent::Idle);
    }

    /// Swap in new endpoints/waypoints. A comparison already running keeps
    /// the configuration it started with.
    pub fn apply_route_config(&self, route: RouteConfig) {
        tracing::info!(
            origin = %route.origin,
            destination = %route.destination,
            first_waypoint = %route.first_waypoint,
            second_waypoint = %route.second_waypoint,
            "Route configuration updated"
        );
        self.route.store(Arc::new(route));
    }

    /// Apply the route section of each reloaded config until the channel
    /// closes or shutdown is signalled.
    pub async fn follow_config_updates(
        self: Arc<Self>,
        mut updates: mpsc::UnboundedReceiver<ComparatorConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                update = updates.recv() => match update {
                    Some(config) if *self.route() != config.route => {
                        self.apply_route_config(config.route);
                    }
                    Some(_) => tracing::debug!("Config reloaded; route section unchanged"),
                    None => break,
                },
                _ = shutdown.recv() => break,
            }
        }
        tracing::debug!("Config update loop exiting");
    }

    /// Once the provider is up, take down a "still loading" notice so the
    /// user is not left looking at a stale error. Anything else shown by
    /// then is left alone.
    pub async fn clear_loading_notice_when_ready(self: Arc<Self>) {
        if self.gate.settled().await != ReadinessState::Ready {
            return;
        }
        let shown = self.current.load_full();
        if !shown.is_loading_notice() {
            return;
        }
        let idle = Arc::new(ComparisonEvent::Idle);
        let previous = self.current.compare_and_swap(&shown, Arc::clone(&idle));
        if Arc::ptr_eq(&*previous, &shown) {
            tracing::debug!("Provider ready; cleared loading notice");
            self.presenter.present(&idle);
        }
    }

    fn render_map(&self, outcome: &ComparisonOutcome) -> Option<MapView> {
        let renderer = self.map.as_ref()?;
        match renderer.render(&MapRoute::best_of(outcome)) {
            Ok(view) => Some(view),
            Err(e) => {
                let err = CompareError::MapRenderFailed(e);
                tracing::warn!(error = %err, "Showing results without a map");
                None
            }
        }
    }

    fn emit(&self, event: ComparisonEvent) {
        self.presenter.present(&event);
        self.current.store(Arc::new(event));
    }
}
