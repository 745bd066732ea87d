pub mod domain;
pub mod icons;
pub mod ports;
pub mod scoring;

pub use domain::{
    Action, CompletionDetails, Frequency, Reminder, ReminderPatch, UserProgress, XpBreakdown,
    DEFAULT_REMINDER_ICON, DEFAULT_REMINDER_TIME, DEFAULT_REMINDER_XP, QUICK_COMPLETION_BONUS_XP,
    QUICK_COMPLETION_WINDOW_MINUTES, SNOOZE_PENALTY_XP, STREAK_BONUS_XP_PER_DAY,
};
pub use ports::{
    IconSuggestion, IconSuggestionService, PortError, PortResult, ProgressRepository,
    TimeSuggestion, TimeSuggestionService,
};
pub use scoring::{score_completion, score_snooze, Scored};
