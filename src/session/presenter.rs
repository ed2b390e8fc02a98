//! Presentation sinks for comparison events.

use crate::comparison::{ComparedRoute, Side};
use crate::session::event::ComparisonEvent;

/// Receives every event the session emits.
pub trait Presenter: Send + Sync {
    fn present(&self, event: &ComparisonEvent);
}

/// Writes events to the log. Used behind the HTTP API, where clients pull
/// the current state themselves.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&self, event: &ComparisonEvent) {
        match event {
            ComparisonEvent::Result { outcome, map } => tracing::info!(
                best = %outcome.better.route.waypoint_label,
                best_duration = %outcome.better.route.duration_text,
                other = %outcome.worse.route.waypoint_label,
                other_duration = %outcome.worse.route.duration_text,
                map = map.is_some(),
                "Comparison result"
            ),
            ComparisonEvent::Failed { message, terminal, failures } => tracing::warn!(
                message = %message,
                terminal = *terminal,
                failed_sides = failures.len(),
                "Comparison failed"
            ),
            other => tracing::debug!(state = other.name(), "Presentation state changed"),
        }
    }
}

/// Prints the two panels to stdout.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn present(&self, event: &ComparisonEvent) {
        println!("{}", render_panels(event));
    }
}

/// Text rendering of an event as left and right panels.
pub fn render_panels(event: &ComparisonEvent) -> String {
    match event {
        ComparisonEvent::Idle => String::new(),
        ComparisonEvent::Loading {
            first_label,
            second_label,
        } => format!(
            "[left]  Calculating route... via {}\n[right] Calculating route... via {}",
            first_label, second_label
        ),
        ComparisonEvent::Result { outcome, map } => {
            let mut out = format!(
                "[left]  {}\n[right] {}",
                panel(outcome.on_side(Side::First)),
                panel(outcome.on_side(Side::Second))
            );
            if let Some(map) = map {
                out.push_str(&format!("\n[map]   {}", map.image_url));
            }
            out
        }
        ComparisonEvent::Failed {
            message, failures, ..
        } => {
            let mut out = format!("[error] {}", message);
            for failure in failures {
                out.push_str(&format!("\n        {}", failure.failure));
            }
            out
        }
    }
}

fn panel(route: &ComparedRoute) -> String {
    let mut text = format!(
        "Via {} | Distance: {} | Time: {}",
        route.route.waypoint_label, route.route.distance_text, route.route.duration_text
    );
    if route.is_best {
        text.push_str(&format!(" | Best Route ({})", route.route.duration_text));
    }
    text
}
