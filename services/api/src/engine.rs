//! services/api/src/engine.rs
//!
//! The completion/scoring engine: owns the reminder collection and the single
//! user-progress record behind one serialized entry point, applies the pure
//! scoring functions from `reminder_core`, and persists the progress snapshot
//! (best-effort) after every mutation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use reminder_core::domain::{
    Action, CompletionDetails, Reminder, ReminderPatch, UserProgress, DEFAULT_REMINDER_ICON,
};
use reminder_core::icons;
use reminder_core::ports::{PortError, PortResult, ProgressRepository};
use reminder_core::scoring::{score_completion, score_snooze};

//=========================================================================================
// Engine Result Types
//=========================================================================================

/// The outcome of a processed action.
///
/// `details` is `None` when the reminder was already completed: both actions
/// are then a no-op and no state was mutated.
#[derive(Debug, Clone)]
pub struct ActionApplied {
    pub reminder: Reminder,
    pub details: Option<CompletionDetails>,
    pub progress: UserProgress,
}

//=========================================================================================
// The Engine
//=========================================================================================

/// All reminder and progress state, guarded by a single mutex.
struct EngineState {
    reminders: HashMap<Uuid, Reminder>,
    progress: UserProgress,
}

/// The single-owner service object for all reminder/progress mutation.
///
/// Every mutation runs to completion under the state lock before its result
/// is observable, which is what keeps the streak/XP invariants intact without
/// any further coordination from callers.
pub struct Engine {
    state: Mutex<EngineState>,
    progress_repo: Arc<dyn ProgressRepository>,
}

impl Engine {
    /// Creates an engine over an empty reminder collection.
    pub fn new(progress_repo: Arc<dyn ProgressRepository>, progress: UserProgress) -> Self {
        Self {
            state: Mutex::new(EngineState {
                reminders: HashMap::new(),
                progress,
            }),
            progress_repo,
        }
    }

    /// Writes the progress snapshot, logging (not propagating) any failure.
    /// The in-memory record stays authoritative for the process lifetime.
    async fn persist_progress(&self, progress: &UserProgress) {
        if let Err(e) = self.progress_repo.save(progress).await {
            warn!("Failed to persist user progress snapshot: {e}");
        }
    }

    pub async fn list(&self) -> Vec<Reminder> {
        let state = self.state.lock().await;
        let mut all: Vec<Reminder> = state.reminders.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        all
    }

    pub async fn get(&self, id: Uuid) -> PortResult<Reminder> {
        let state = self.state.lock().await;
        state
            .reminders
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(id.to_string()))
    }

    pub async fn insert(&self, reminder: Reminder) -> Reminder {
        let mut state = self.state.lock().await;
        state.reminders.insert(reminder.id, reminder.clone());
        reminder
    }

    /// Removes the reminder, returning the deleted record.
    pub async fn delete(&self, id: Uuid) -> PortResult<Reminder> {
        let mut state = self.state.lock().await;
        state
            .reminders
            .remove(&id)
            .ok_or_else(|| PortError::NotFound(id.to_string()))
    }

    pub async fn progress(&self) -> UserProgress {
        self.state.lock().await.progress.clone()
    }

    /// Applies `complete` or `snooze` to the reminder at instant `now`.
    ///
    /// Already-completed reminders return `details: None` with nothing
    /// mutated; this is the idempotence guarantee for repeated calls.
    pub async fn apply_action(
        &self,
        id: Uuid,
        action: Action,
        now: DateTime<Utc>,
    ) -> PortResult<ActionApplied> {
        let mut state = self.state.lock().await;
        let reminder = state
            .reminders
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(id.to_string()))?;

        if reminder.completed {
            return Ok(ActionApplied {
                reminder,
                details: None,
                progress: state.progress.clone(),
            });
        }

        let applied = match action {
            Action::Complete => {
                let scored = score_completion(&reminder, &state.progress, now);
                let mut updated = reminder;
                updated.completed = true;
                // The stored award becomes the actual payout for this completion.
                updated.xp_value = scored.details.xp_earned.total;
                state.reminders.insert(id, updated.clone());
                state.progress = scored.progress;
                ActionApplied {
                    reminder: updated,
                    details: Some(scored.details),
                    progress: state.progress.clone(),
                }
            }
            Action::Snooze => {
                // A snooze touches only the progress record.
                let scored = score_snooze(&state.progress);
                state.progress = scored.progress;
                ActionApplied {
                    reminder,
                    details: Some(scored.details),
                    progress: state.progress.clone(),
                }
            }
        };

        let snapshot = applied.progress.clone();
        drop(state);
        self.persist_progress(&snapshot).await;
        Ok(applied)
    }

    /// Merges caller-supplied fields into the reminder. `completed` and
    /// `xp_value` are not expressible through a patch; the icon falls back to
    /// the existing icon, then to the default, when submitted empty.
    pub async fn apply_patch(&self, id: Uuid, patch: ReminderPatch) -> PortResult<Reminder> {
        let mut state = self.state.lock().await;
        let existing = state
            .reminders
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(id.to_string()))?;

        let mut updated = existing.clone();
        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(description) = patch.description {
            updated.description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
        }
        if let Some(time) = patch.time {
            updated.time = time;
        }
        if let Some(frequency) = patch.frequency {
            updated.frequency = frequency;
        }

        let submitted_icon = patch
            .icon
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        updated.icon = match submitted_icon {
            Some(name) => icons::resolve(name).to_string(),
            None if existing.icon.is_empty() => DEFAULT_REMINDER_ICON.to_string(),
            None => existing.icon,
        };

        state.reminders.insert(id, updated.clone());
        Ok(updated)
    }
}
