//! Active readiness polling.
//!
//! # Responsibilities
//! - Periodically check whether the provider client is up
//! - Try to initialize it while it is not
//! - Settle the gate: Ready, or Failed once the deadline passes

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{self, Instant};

use crate::config::ReadinessConfig;
use crate::directions::DirectionsProvider;
use crate::health::state::{ReadinessGate, ReadinessState};
use crate::observability::metrics;

pub struct ReadinessMonitor<P> {
    provider: Arc<P>,
    gate: Arc<ReadinessGate>,
    poll_interval: Duration,
    timeout: Duration,
}

impl<P: DirectionsProvider> ReadinessMonitor<P> {
    pub fn new(
        provider: Arc<P>,
        gate: Arc<ReadinessGate>,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            gate,
            poll_interval,
            timeout,
        }
    }

    pub fn from_config(provider: Arc<P>, gate: Arc<ReadinessGate>, config: &ReadinessConfig) -> Self {
        Self::new(
            provider,
            gate,
            Duration::from_millis(config.poll_interval_ms),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Poll until the gate settles or shutdown is signalled. Returns the
    /// state the gate was left in.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> ReadinessState {
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            timeout_secs = self.timeout.as_secs(),
            "Readiness monitor starting"
        );

        let deadline = Instant::now() + self.timeout;
        let mut ticker = time::interval(self.poll_interval);
        metrics::record_provider_ready(false);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.probe(deadline).await {
                        if self.gate.mark_ready() {
                            metrics::record_provider_ready(true);
                            tracing::info!("Directions provider is ready");
                        }
                        return self.gate.state();
                    }
                    if Instant::now() >= deadline {
                        if self.gate.mark_failed() {
                            tracing::warn!(
                                timeout_secs = self.timeout.as_secs(),
                                "Directions provider did not load in time; giving up"
                            );
                        }
                        return self.gate.state();
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Readiness monitor received shutdown signal, exiting loop");
                    return self.gate.state();
                }
            }
        }
    }

    async fn probe(&self, deadline: Instant) -> bool {
        if self.provider.is_ready() {
            return true;
        }
        match time::timeout_at(deadline, self.provider.initialize()).await {
            Ok(Ok(())) => self.provider.is_ready(),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Directions provider not ready yet");
                false
            }
            Err(_) => false,
        }
    }
}
