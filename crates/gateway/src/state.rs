//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}
