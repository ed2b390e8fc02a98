//! The directions provider seam.

use std::future::Future;

use crate::directions::types::{DirectionsLeg, DirectionsRequest, ProviderError};

/// An external service that answers directions queries.
///
/// This is the single point where a provider's own calling convention is
/// turned into futures. Everything above it (fetch, comparison, session)
/// only sees `route` and the readiness pair.
pub trait DirectionsProvider: Send + Sync + 'static {
    /// Resolve `request` to the first leg of the first route.
    fn route(
        &self,
        request: &DirectionsRequest,
    ) -> impl Future<Output = Result<DirectionsLeg, ProviderError>> + Send;

    /// Whether the provider client has been brought up.
    fn is_ready(&self) -> bool;

    /// Try to bring the provider client up. Called repeatedly by the
    /// readiness monitor until `is_ready` holds or its deadline passes.
    fn initialize(&self) -> impl Future<Output = Result<(), ProviderError>> + Send;
}
