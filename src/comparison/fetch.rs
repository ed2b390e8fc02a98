//! Single route fetch.

use std::time::{Duration, Instant};

use crate::comparison::error::RouteUnavailable;
use crate::comparison::types::{waypoint_label, RouteQuery, RouteResult};
use crate::directions::DirectionsProvider;
use crate::observability::metrics;
use crate::resilience::timeouts::call_with_timeout;

/// Ask the provider for one route and keep the first leg's display fields.
pub async fn fetch_route<P: DirectionsProvider>(
    provider: &P,
    query: &RouteQuery,
    deadline: Duration,
) -> Result<RouteResult, RouteUnavailable> {
    let start = Instant::now();
    let request = query.to_request();

    tracing::debug!(waypoint = %query.waypoint, "Requesting route");

    match call_with_timeout(deadline, provider.route(&request)).await {
        Ok(leg) => {
            let result = RouteResult::from_leg(query, leg);
            metrics::record_provider_call(&result.waypoint_label, "OK", start);
            tracing::debug!(
                waypoint = %query.waypoint,
                distance = %result.distance_text,
                duration = %result.duration_text,
                steps = result.step_count,
                "Route received"
            );
            Ok(result)
        }
        Err(reason) => {
            metrics::record_provider_call(
                &waypoint_label(&query.waypoint),
                &reason.status_label(),
                start,
            );
            tracing::warn!(waypoint = %query.waypoint, error = %reason, "Route unavailable");
            Err(RouteUnavailable {
                waypoint: query.waypoint.clone(),
                reason,
            })
        }
    }
}
