//! Application state for the web layer.

use std::sync::Arc;

use crate::osrm::OsrmClient;
use crate::overpass::OverpassClient;
use crate::session::Session;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Overpass client for station discovery
    pub overpass: Arc<OverpassClient>,

    /// OSRM client for distances and routes
    pub osrm: Arc<OsrmClient>,

    /// The user's session
    pub session: Session,
}

impl AppState {
    /// Create a new app state.
    pub fn new(overpass: OverpassClient, osrm: OsrmClient, session: Session) -> Self {
        Self {
            overpass: Arc::new(overpass),
            osrm: Arc::new(osrm),
            session,
        }
    }
}
