//! Scripted provider double for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::directions::provider::DirectionsProvider;
use crate::directions::types::{DirectionsLeg, DirectionsRequest, ProviderError};

#[derive(Clone)]
pub(crate) struct Reply {
    pub delay: Duration,
    pub result: Result<DirectionsLeg, ProviderError>,
}

pub(crate) fn leg(distance: &str, duration: &str, steps: usize) -> DirectionsLeg {
    DirectionsLeg {
        distance_text: distance.to_string(),
        duration_text: duration.to_string(),
        step_count: steps,
    }
}

/// Answers per waypoint from a script. The n-th call for a waypoint gets the
/// n-th reply; the last reply repeats once the script runs out.
pub(crate) struct ScriptedProvider {
    replies: HashMap<String, Vec<Reply>>,
    calls: Mutex<HashMap<String, usize>>,
    pub dispatched: Mutex<Vec<(String, Instant)>>,
    pub completed: Mutex<Vec<(String, Instant)>>,
    ready: AtomicBool,
    ready_after: Option<usize>,
    pub init_attempts: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
            dispatched: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
            ready: AtomicBool::new(true),
            ready_after: None,
            init_attempts: AtomicUsize::new(0),
        }
    }

    pub fn reply(mut self, waypoint: &str, delay_ms: u64, result: Result<DirectionsLeg, ProviderError>) -> Self {
        self.replies.entry(waypoint.to_string()).or_default().push(Reply {
            delay: Duration::from_millis(delay_ms),
            result,
        });
        self
    }

    /// Not ready until `attempts` calls to `initialize`; `None` means never.
    pub fn not_ready(mut self, attempts: Option<usize>) -> Self {
        self.ready = AtomicBool::new(false);
        self.ready_after = attempts;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl DirectionsProvider for ScriptedProvider {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsLeg, ProviderError> {
        let waypoint = request
            .waypoints
            .first()
            .map(|w| w.location.clone())
            .unwrap_or_default();
        self.dispatched.lock().unwrap().push((waypoint.clone(), Instant::now()));

        let reply = {
            let mut calls = self.calls.lock().unwrap();
            let n = calls.entry(waypoint.clone()).or_insert(0);
            let script = self
                .replies
                .get(&waypoint)
                .expect("no scripted reply for waypoint");
            let reply = script[(*n).min(script.len() - 1)].clone();
            *n += 1;
            reply
        };

        tokio::time::sleep(reply.delay).await;
        self.completed.lock().unwrap().push((waypoint, Instant::now()));
        reply.result
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn initialize(&self) -> Result<(), ProviderError> {
        let attempt = self.init_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        match self.ready_after {
            Some(n) if attempt >= n => {
                self.ready.store(true, Ordering::SeqCst);
                Ok(())
            }
            _ => Err(ProviderError::NotInitialized("still loading".to_string())),
        }
    }
}
