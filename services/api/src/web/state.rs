//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use crate::config::Config;
use crate::engine::Engine;
use reminder_core::ports::{IconSuggestionService, TimeSuggestionService};

/// The shared application state, created once at startup and passed to all handlers.
///
/// All reminder/progress mutation goes through `engine`, which serializes it
/// internally; the suggestion adapters are called outside that lock and may
/// run concurrently with unrelated reminder operations.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub config: Arc<Config>,
    pub icon_adapter: Arc<dyn IconSuggestionService>,
    pub time_adapter: Arc<dyn TimeSuggestionService>,
}
