//! Dual-route comparison.

use futures_util::future::join;
use std::sync::Arc;
use std::time::Duration;

use crate::comparison::duration::parse_duration;
use crate::comparison::error::{CompareError, RouteUnavailable, SideFailure};
use crate::comparison::fetch::fetch_route;
use crate::comparison::types::{
    ComparedRoute, ComparisonOutcome, Palette, RouteQuery, RouteResult, Side,
};
use crate::directions::DirectionsProvider;

/// Compares two routes that differ only in their required waypoint.
pub struct RouteComparator<P> {
    provider: Arc<P>,
    request_timeout: Duration,
    palette: Palette,
}

impl<P: DirectionsProvider> RouteComparator<P> {
    pub fn new(provider: Arc<P>, request_timeout: Duration, palette: Palette) -> Self {
        Self {
            provider,
            request_timeout,
            palette,
        }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Fetch both routes concurrently and rank them by parsed duration.
    ///
    /// Both requests are in flight before either is awaited. If either
    /// fails the whole comparison fails; the error lists every failed side.
    pub async fn compare_routes(
        &self,
        origin: &str,
        destination: &str,
        waypoint_a: &str,
        waypoint_b: &str,
    ) -> Result<ComparisonOutcome, CompareError> {
        let first = RouteQuery::new(origin, destination, waypoint_a);
        let second = RouteQuery::new(origin, destination, waypoint_b);
        let provider = self.provider.as_ref();

        let (first_result, second_result) = join(
            fetch_route(provider, &first, self.request_timeout),
            fetch_route(provider, &second, self.request_timeout),
        )
        .await;

        match (first_result, second_result) {
            (Ok(a), Ok(b)) => Ok(select_best(origin, destination, a, b, &self.palette)),
            (a, b) => Err(CompareError::ComparisonFailed {
                failures: collect_failures(a.err(), b.err()),
            }),
        }
    }
}

fn collect_failures(
    first: Option<RouteUnavailable>,
    second: Option<RouteUnavailable>,
) -> Vec<SideFailure> {
    [(Side::First, first), (Side::Second, second)]
        .into_iter()
        .filter_map(|(side, failure)| failure.map(|failure| SideFailure { side, failure }))
        .collect()
}

/// Rank two fetched routes. The first route wins ties.
pub fn select_best(
    origin: &str,
    destination: &str,
    first: RouteResult,
    second: RouteResult,
    palette: &Palette,
) -> ComparisonOutcome {
    let first_minutes = parse_duration(&first.duration_text);
    let second_minutes = parse_duration(&second.duration_text);

    let (better, better_side, worse, worse_side) = if first_minutes <= second_minutes {
        (first, Side::First, second, Side::Second)
    } else {
        (second, Side::Second, first, Side::First)
    };

    tracing::info!(
        best = %better.waypoint_label,
        best_minutes = first_minutes.min(second_minutes),
        other = %worse.waypoint_label,
        other_minutes = first_minutes.max(second_minutes),
        "Routes compared"
    );

    ComparisonOutcome {
        origin: origin.to_string(),
        destination: destination.to_string(),
        better: ComparedRoute {
            route: better,
            side: better_side,
            is_best: true,
            color: palette.best.clone(),
        },
        worse: ComparedRoute {
            route: worse,
            side: worse_side,
            is_best: false,
            color: palette.alternate.clone(),
        },
    }
}
