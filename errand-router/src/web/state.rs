//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedDirections;
use crate::directions::{DirectionsClient, DirectionsOutcome, DirectionsProvider, StraightLineDirections};
use crate::domain::Leg;
use crate::optimizer::OptimizerClient;
use crate::render::MapView;
use crate::session::RouteController;

/// Directions source chosen at startup.
pub enum ServerDirections {
    /// Cached directions API client
    Api(CachedDirections<DirectionsClient>),
    /// Offline straight-line directions
    Mock(StraightLineDirections),
}

impl DirectionsProvider for ServerDirections {
    async fn directions(&self, leg: &Leg) -> DirectionsOutcome {
        match self {
            ServerDirections::Api(client) => client.directions(leg).await,
            ServerDirections::Mock(mock) => mock.directions(leg).await,
        }
    }
}

/// The controller type the server runs.
pub type RouteControllerHandle = RouteController<ServerDirections, MapView>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route sessions and the map they draw on
    pub routes: Arc<RouteControllerHandle>,

    /// Stop-ordering optimizer, if one is configured
    pub optimizer: Option<Arc<OptimizerClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routes: RouteControllerHandle, optimizer: Option<OptimizerClient>) -> Self {
        Self {
            routes: Arc::new(routes),
            optimizer: optimizer.map(Arc::new),
        }
    }
}
