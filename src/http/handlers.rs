//! Request handlers for the comparison API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::comparison::CompareError;
use crate::directions::DirectionsProvider;
use crate::health::ReadinessState;
use crate::session::{ComparisonEvent, ComparisonSession};

/// Application state injected into handlers.
pub struct AppState<P> {
    pub session: Arc<ComparisonSession<P>>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub provider: ReadinessState,
    pub comparing: bool,
}

/// `GET /health`: 200 once the provider is ready, 503 before that or after
/// it failed to load.
pub async fn health<P: DirectionsProvider>(State(state): State<AppState<P>>) -> Response {
    let provider = state.session.gate().state();
    let (code, status) = match provider {
        ReadinessState::Ready => (StatusCode::OK, "ok"),
        ReadinessState::Loading => (StatusCode::SERVICE_UNAVAILABLE, "loading"),
        ReadinessState::Failed => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
    };
    let body = HealthBody {
        status,
        provider,
        comparing: state.session.is_comparing(),
    };
    (code, Json(body)).into_response()
}

/// `GET /api/state`
pub async fn current_state<P: DirectionsProvider>(
    State(state): State<AppState<P>>,
) -> Json<ComparisonEvent> {
    Json(current(&state))
}

/// `POST /api/compare`
pub async fn compare<P: DirectionsProvider>(State(state): State<AppState<P>>) -> Response {
    match state.session.request_comparison().await {
        Ok(_) => Json(current(&state)).into_response(),
        Err(e) => ApiError {
            error: e,
            state: state.session.current(),
        }
        .into_response(),
    }
}

/// `POST /api/reset`: dismiss whatever is shown.
pub async fn reset<P: DirectionsProvider>(
    State(state): State<AppState<P>>,
) -> Json<ComparisonEvent> {
    state.session.reset();
    Json(current(&state))
}

fn current<P: DirectionsProvider>(state: &AppState<P>) -> ComparisonEvent {
    ComparisonEvent::clone(&state.session.current())
}

/// A failed comparison together with what the presentation layer now shows.
pub struct ApiError {
    pub error: CompareError,
    pub state: Arc<ComparisonEvent>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    state: &'a ComparisonEvent,
}

pub fn status_for(error: &CompareError) -> StatusCode {
    match error {
        CompareError::InProgress => StatusCode::CONFLICT,
        CompareError::ProviderLoading | CompareError::ProviderNotReady { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        CompareError::RouteUnavailable(_) | CompareError::ComparisonFailed { .. } => {
            StatusCode::BAD_GATEWAY
        }
        CompareError::MapRenderFailed(_) | CompareError::Interrupted => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = status_for(&self.error);
        let body = ErrorBody {
            error: self.error.to_string(),
            state: &self.state,
        };
        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::{DirectionsStatus, ProviderError};
    use crate::comparison::{RouteUnavailable, Side, SideFailure};

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&CompareError::InProgress), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&CompareError::Interrupted),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&CompareError::ProviderLoading),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&CompareError::ProviderNotReady { timeout_secs: 30 }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let failures = vec![SideFailure {
            side: Side::First,
            failure: RouteUnavailable {
                waypoint: "Lee Highway, Centreville, VA".to_string(),
                reason: ProviderError::Status(DirectionsStatus::ZeroResults),
            },
        }];
        assert_eq!(
            status_for(&CompareError::ComparisonFailed { failures }),
            StatusCode::BAD_GATEWAY
        );
    }
}
