//! crates/reminder_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or transport layer; the
//! serde derives only fix the wire/snapshot field names (camelCase).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Scoring Constants
//=========================================================================================

// Fixed scoring parameters. These are deliberately not configuration:
// changing them mid-flight would make persisted XP totals meaningless.

/// XP deducted from the user when a reminder is snoozed.
pub const SNOOZE_PENALTY_XP: i64 = 5;

/// A one-time reminder completed within this many minutes of its creation
/// earns the quick-completion bonus.
pub const QUICK_COMPLETION_WINDOW_MINUTES: i64 = 10;

/// Flat bonus XP for a quick completion.
pub const QUICK_COMPLETION_BONUS_XP: i64 = 10;

/// Bonus XP per consecutive day beyond the first in the current streak.
pub const STREAK_BONUS_XP_PER_DAY: i64 = 5;

/// Base XP assigned to a reminder when the caller does not specify one.
pub const DEFAULT_REMINDER_XP: i64 = 10;

/// Icon used whenever a reminder has no recognizable icon of its own.
pub const DEFAULT_REMINDER_ICON: &str = "ClipboardList";

/// Time of day used when the suggestion collaborator cannot produce one.
pub const DEFAULT_REMINDER_TIME: &str = "09:00";

//=========================================================================================
// Core Data Structures
//=========================================================================================

/// How often a reminder recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    Custom,
}

/// A single reminder record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Wall-clock time of day, `HH:MM`, 24-hour. Validated at the API boundary.
    pub time: String,
    pub frequency: Frequency,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    /// Flips false -> true exactly once; there is no un-complete operation.
    pub completed: bool,
    /// Base XP award while active; rewritten to the total actually paid out
    /// when the reminder is completed.
    pub xp_value: i64,
}

impl Reminder {
    /// Builds a fresh, uncompleted reminder with a new id.
    pub fn new(
        title: String,
        description: Option<String>,
        time: String,
        frequency: Frequency,
        icon: String,
        xp_value: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            time,
            frequency,
            icon,
            created_at: Utc::now(),
            completed: false,
            xp_value,
        }
    }
}

/// The single, process-wide gamification record. Mutated exclusively by the
/// scoring engine and persisted (best-effort) after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Cumulative XP. Never negative; snooze penalties floor at zero.
    pub xp: i64,
    /// Count of consecutive calendar days with at least one completion.
    pub current_streak: u32,
    /// Calendar date of the most recent completion, or `None` after a snooze
    /// reset (or before the first-ever completion).
    pub last_completion_date: Option<NaiveDate>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            current_streak: 0,
            last_completion_date: None,
        }
    }
}

/// A partial update to a reminder's caller-editable fields.
///
/// `completed` and `xp_value` are deliberately not expressible here: the only
/// way to change them is through the scoring engine's `complete` action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
    pub frequency: Option<Frequency>,
    pub icon: Option<String>,
}

//=========================================================================================
// Scoring Outcome Types
//=========================================================================================

/// The action verbs accepted by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Complete,
    Snooze,
}

/// Itemized XP movement for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpBreakdown {
    pub base: i64,
    pub quick_bonus: i64,
    pub streak_bonus: i64,
    pub total: i64,
}

/// What the caller gets back after a processed `complete` or `snooze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDetails {
    pub xp_earned: XpBreakdown,
    pub new_streak: u32,
    pub bonus_message: String,
}
