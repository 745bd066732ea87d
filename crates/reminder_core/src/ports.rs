//! crates/reminder_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the
//! snapshot store or the suggestion model.

use async_trait::async_trait;

use crate::domain::UserProgress;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., filesystem, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable storage for the single [`UserProgress`] snapshot.
///
/// Saves are best-effort: the engine logs a failed save and continues with
/// the in-memory record as the authoritative copy.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Durably writes the current progress snapshot.
    async fn save(&self, progress: &UserProgress) -> PortResult<()>;

    /// Loads the last persisted snapshot, or `None` if nothing was ever saved.
    async fn load(&self) -> PortResult<Option<UserProgress>>;
}

/// An icon recommendation produced by the suggestion collaborator.
#[derive(Debug, Clone)]
pub struct IconSuggestion {
    pub suggested_icon_name: String,
    pub reasoning: String,
}

/// A full reminder draft produced from a free-text description.
#[derive(Debug, Clone)]
pub struct TimeSuggestion {
    pub title: String,
    pub description: String,
    /// `HH:MM`, 24-hour.
    pub suggested_time: String,
    pub suggested_icon: Option<String>,
    pub reasoning: String,
}

/// Suggests a renderable icon for a reminder from its title and description.
///
/// May fail (model unavailable, malformed output); callers substitute the
/// default icon rather than propagate the failure.
#[async_trait]
pub trait IconSuggestionService: Send + Sync {
    async fn suggest_icon(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> PortResult<IconSuggestion>;
}

/// Drafts a complete reminder (title, time, icon) from free text.
///
/// Same failure contract as [`IconSuggestionService`]: callers fall back to a
/// fixed local default, never surfacing the failure to the user-facing flow.
#[async_trait]
pub trait TimeSuggestionService: Send + Sync {
    async fn suggest_time(&self, description: &str) -> PortResult<TimeSuggestion>;
}
