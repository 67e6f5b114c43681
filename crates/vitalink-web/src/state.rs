//! Application state.

use std::sync::Arc;
use vitalink_core::Broadcaster;
use vitalink_store::UserStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub broadcaster: Broadcaster,
    /// Shared secret devices present as a bearer token.
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, broadcaster: Broadcaster, api_key: &str) -> Self {
        Self {
            store,
            broadcaster,
            api_key: Arc::from(api_key),
        }
    }
}
