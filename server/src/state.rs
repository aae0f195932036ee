use std::sync::Arc;

use crate::config::Environment;
use crate::db::EventStore;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventStore>,
    /// Attach underlying failure text to 500 responses.
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(events: Arc<dyn EventStore>, environment: Environment) -> Self {
        Self {
            events,
            expose_error_details: !environment.is_production(),
        }
    }
}
