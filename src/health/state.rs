//! Provider readiness state machine.
//!
//! # States
//! - Loading: provider client not up yet; comparisons get a transient error
//! - Ready: comparisons allowed
//! - Failed: readiness bound elapsed; comparisons get a terminal error
//!
//! # State Transitions
//! ```text
//! Loading → Ready: provider initialized
//! Loading → Failed: timeout elapsed
//! ```
//! Both transitions are one-way; the first one wins.

use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

use crate::comparison::CompareError;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    Loading = 0,
    Ready = 1,
    Failed = 2,
}

impl From<u8> for ReadinessState {
    fn from(val: u8) -> Self {
        match val {
            1 => ReadinessState::Ready,
            2 => ReadinessState::Failed,
            _ => ReadinessState::Loading,
        }
    }
}

/// Shared answer to "may we call the provider yet?".
#[derive(Debug)]
pub struct ReadinessGate {
    state: AtomicU8,
    timeout: Duration,
    settled: Notify,
}

impl ReadinessGate {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: AtomicU8::new(ReadinessState::Loading as u8),
            timeout,
            settled: Notify::new(),
        }
    }

    /// A gate that starts out ready, for providers that need no warm-up.
    pub fn ready() -> Self {
        Self {
            state: AtomicU8::new(ReadinessState::Ready as u8),
            timeout: Duration::ZERO,
            settled: Notify::new(),
        }
    }

    pub fn state(&self) -> ReadinessState {
        ReadinessState::from(self.state.load(Ordering::Acquire))
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ReadinessState::Ready
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Loading → Ready. Returns false if the gate had already settled.
    pub fn mark_ready(&self) -> bool {
        self.transition(ReadinessState::Ready)
    }

    /// Loading → Failed. Returns true only for the call that made the
    /// transition, so the terminal failure is reported once.
    pub fn mark_failed(&self) -> bool {
        self.transition(ReadinessState::Failed)
    }

    fn transition(&self, to: ReadinessState) -> bool {
        let moved = self
            .state
            .compare_exchange(
                ReadinessState::Loading as u8,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if moved {
            self.settled.notify_waiters();
        }
        moved
    }

    /// Wait until the gate leaves `Loading` and return where it landed.
    pub async fn settled(&self) -> ReadinessState {
        let notified = self.settled.notified();
        tokio::pin!(notified);
        // Register before reading the state so a transition in between is not missed.
        notified.as_mut().enable();

        let state = self.state();
        if state != ReadinessState::Loading {
            return state;
        }
        notified.await;
        self.state()
    }

    /// Gate a comparison request.
    pub fn check(&self) -> Result<(), CompareError> {
        match self.state() {
            ReadinessState::Ready => Ok(()),
            ReadinessState::Loading => Err(CompareError::ProviderLoading),
            ReadinessState::Failed => Err(CompareError::ProviderNotReady {
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}
