//! Application state.

use std::sync::Arc;

use auth::JwtManager;
use resource_store::ResourceStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: ResourceStore> {
    /// Server configuration.
    pub config: Config,
    /// Resource store.
    pub store: S,
    /// JWT manager.
    pub jwt_manager: JwtManager,
}

impl<S: ResourceStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S, jwt_manager: JwtManager) -> Self {
        Self {
            config,
            store,
            jwt_manager,
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: ResourceStore>(
    config: Config,
    store: S,
    jwt_manager: JwtManager,
) -> SharedState<S> {
    Arc::new(AppState::new(config, store, jwt_manager))
}
