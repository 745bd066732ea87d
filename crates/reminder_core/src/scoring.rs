//! crates/reminder_core/src/scoring.rs
//!
//! The pure scoring computation behind `complete` and `snooze`.
//!
//! These functions take the current reminder/progress state plus an explicit
//! "now" and return the new progress record together with the outcome the
//! caller reports. They perform no I/O; the engine applies the returned state
//! to the store and persists it afterwards.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    CompletionDetails, Frequency, Reminder, UserProgress, XpBreakdown,
    QUICK_COMPLETION_BONUS_XP, QUICK_COMPLETION_WINDOW_MINUTES, SNOOZE_PENALTY_XP,
    STREAK_BONUS_XP_PER_DAY,
};

/// The result of scoring one action: the progress record to store and the
/// details to hand back to the caller.
#[derive(Debug, Clone)]
pub struct Scored {
    pub progress: UserProgress,
    pub details: CompletionDetails,
}

/// Scores a completion of `reminder` at instant `now`.
///
/// The caller is responsible for checking that the reminder is not already
/// completed, and for writing `details.xp_earned.total` back into the
/// reminder's `xp_value` alongside the `completed` flag.
pub fn score_completion(
    reminder: &Reminder,
    progress: &UserProgress,
    now: DateTime<Utc>,
) -> Scored {
    let mut progress = progress.clone();

    let base = reminder.xp_value;

    // Quick-completion bonus: one-time reminders knocked out shortly after
    // creation. Elapsed time is compared in whole minutes.
    let elapsed_minutes = (now - reminder.created_at).num_minutes();
    let quick_bonus = if reminder.frequency == Frequency::Once
        && elapsed_minutes <= QUICK_COMPLETION_WINDOW_MINUTES
    {
        QUICK_COMPLETION_BONUS_XP
    } else {
        0
    };

    // Streak: calendar dates derived from a single zone (UTC). A completion
    // the day after the last one extends the streak; any other gap resets it
    // to 1; a second completion on the same day leaves it where it is.
    let today = now.date_naive();
    let yesterday = today - Duration::days(1);

    if progress.last_completion_date == Some(yesterday) {
        progress.current_streak += 1;
    } else if progress.last_completion_date != Some(today) {
        progress.current_streak = 1;
    }

    let streak_bonus = if progress.current_streak > 1 {
        (i64::from(progress.current_streak) - 1) * STREAK_BONUS_XP_PER_DAY
    } else {
        0
    };
    progress.last_completion_date = Some(today);

    let total = base + quick_bonus + streak_bonus;
    progress.xp += total;

    let mut bonus_message = format!("You earned {} XP!", base);
    if quick_bonus > 0 {
        bonus_message.push_str(&format!(" +{} XP (Quick Completion!)", quick_bonus));
    }
    if streak_bonus > 0 {
        bonus_message.push_str(&format!(
            " +{} XP ({}-day streak!)",
            streak_bonus, progress.current_streak
        ));
    }
    if quick_bonus > 0 || streak_bonus > 0 {
        bonus_message.push_str(&format!(" Total: {} XP.", total));
    }

    let details = CompletionDetails {
        xp_earned: XpBreakdown {
            base,
            quick_bonus,
            streak_bonus,
            total,
        },
        new_streak: progress.current_streak,
        bonus_message,
    };

    Scored { progress, details }
}

/// Scores a snooze: deduct the penalty (floored at zero XP) and break any
/// in-progress streak. The reminder itself is untouched by a snooze.
pub fn score_snooze(progress: &UserProgress) -> Scored {
    let mut progress = progress.clone();

    progress.xp = (progress.xp - SNOOZE_PENALTY_XP).max(0);

    let old_streak = progress.current_streak;
    progress.current_streak = 0;
    progress.last_completion_date = None;

    let mut bonus_message = format!("Reminder snoozed. You lost {} XP.", SNOOZE_PENALTY_XP);
    if old_streak > 1 {
        bonus_message.push_str(&format!(" Your {}-day streak was reset.", old_streak));
    }

    let details = CompletionDetails {
        xp_earned: XpBreakdown {
            base: -SNOOZE_PENALTY_XP,
            quick_bonus: 0,
            streak_bonus: 0,
            total: -SNOOZE_PENALTY_XP,
        },
        new_streak: 0,
        bonus_message,
    };

    Scored { progress, details }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn reminder(frequency: Frequency, created_at: DateTime<Utc>) -> Reminder {
        Reminder {
            id: uuid::Uuid::new_v4(),
            title: "Drink water".to_string(),
            description: None,
            time: "09:00".to_string(),
            frequency,
            icon: "GlassWater".to_string(),
            created_at,
            completed: false,
            xp_value: 10,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quick_bonus_inside_window() {
        let created = at(2024, 3, 1, 12, 0);
        let now = at(2024, 3, 1, 12, 5);
        let scored = score_completion(&reminder(Frequency::Once, created), &UserProgress::default(), now);
        assert_eq!(scored.details.xp_earned.quick_bonus, QUICK_COMPLETION_BONUS_XP);
        assert_eq!(scored.details.xp_earned.total, 10 + QUICK_COMPLETION_BONUS_XP);
    }

    #[test]
    fn test_quick_bonus_at_exact_window_boundary() {
        let created = at(2024, 3, 1, 12, 0);
        let now = at(2024, 3, 1, 12, 10);
        let scored = score_completion(&reminder(Frequency::Once, created), &UserProgress::default(), now);
        assert_eq!(scored.details.xp_earned.quick_bonus, QUICK_COMPLETION_BONUS_XP);
    }

    #[test]
    fn test_no_quick_bonus_outside_window() {
        let created = at(2024, 3, 1, 12, 0);
        let now = at(2024, 3, 1, 12, 11);
        let scored = score_completion(&reminder(Frequency::Once, created), &UserProgress::default(), now);
        assert_eq!(scored.details.xp_earned.quick_bonus, 0);
    }

    #[test]
    fn test_no_quick_bonus_for_recurring_reminders() {
        let created = at(2024, 3, 1, 12, 0);
        let now = at(2024, 3, 1, 12, 1);
        let scored = score_completion(&reminder(Frequency::Daily, created), &UserProgress::default(), now);
        assert_eq!(scored.details.xp_earned.quick_bonus, 0);
    }

    #[test]
    fn test_first_completion_starts_streak_without_bonus() {
        let now = at(2024, 3, 1, 23, 0);
        let scored = score_completion(&reminder(Frequency::Daily, now), &UserProgress::default(), now);
        assert_eq!(scored.progress.current_streak, 1);
        assert_eq!(scored.details.xp_earned.streak_bonus, 0);
        assert_eq!(scored.progress.last_completion_date, Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_next_day_completion_extends_streak_and_pays_bonus() {
        let progress = UserProgress {
            xp: 10,
            current_streak: 1,
            last_completion_date: Some(date(2024, 3, 1)),
        };
        let now = at(2024, 3, 2, 8, 0);
        let scored = score_completion(&reminder(Frequency::Daily, now), &progress, now);
        assert_eq!(scored.progress.current_streak, 2);
        assert_eq!(scored.details.xp_earned.streak_bonus, STREAK_BONUS_XP_PER_DAY);
        assert_eq!(scored.details.new_streak, 2);
    }

    #[test]
    fn test_same_day_repeat_does_not_advance_streak() {
        // A second completion on the same calendar day keeps the streak where
        // it is but still pays the bonus derived from it.
        let progress = UserProgress {
            xp: 35,
            current_streak: 2,
            last_completion_date: Some(date(2024, 3, 2)),
        };
        let now = at(2024, 3, 2, 20, 0);
        let scored = score_completion(&reminder(Frequency::Daily, now), &progress, now);
        assert_eq!(scored.progress.current_streak, 2);
        assert_eq!(scored.details.xp_earned.streak_bonus, STREAK_BONUS_XP_PER_DAY);
    }

    #[test]
    fn test_skipped_day_resets_streak_to_one() {
        let progress = UserProgress {
            xp: 50,
            current_streak: 3,
            last_completion_date: Some(date(2024, 3, 2)),
        };
        let now = at(2024, 3, 4, 9, 0);
        let scored = score_completion(&reminder(Frequency::Daily, now), &progress, now);
        assert_eq!(scored.progress.current_streak, 1);
        assert_eq!(scored.details.xp_earned.streak_bonus, 0);
    }

    #[test]
    fn test_total_is_sum_of_base_and_bonuses() {
        let progress = UserProgress {
            xp: 0,
            current_streak: 3,
            last_completion_date: Some(date(2024, 3, 1)),
        };
        let created = at(2024, 3, 2, 9, 0);
        let now = at(2024, 3, 2, 9, 4);
        let scored = score_completion(&reminder(Frequency::Once, created), &progress, now);
        // streak extends to 4: bonus (4 - 1) * 5 = 15; quick bonus 10; base 10.
        assert_eq!(scored.details.xp_earned.base, 10);
        assert_eq!(scored.details.xp_earned.quick_bonus, 10);
        assert_eq!(scored.details.xp_earned.streak_bonus, 15);
        assert_eq!(scored.details.xp_earned.total, 35);
        assert_eq!(scored.progress.xp, 35);
    }

    #[test]
    fn test_message_base_only() {
        let now = at(2024, 3, 1, 9, 0);
        let scored = score_completion(&reminder(Frequency::Daily, now), &UserProgress::default(), now);
        assert_eq!(scored.details.bonus_message, "You earned 10 XP!");
    }

    #[test]
    fn test_message_with_all_bonuses_in_order() {
        let progress = UserProgress {
            xp: 0,
            current_streak: 1,
            last_completion_date: Some(date(2024, 3, 1)),
        };
        let created = at(2024, 3, 2, 9, 0);
        let now = at(2024, 3, 2, 9, 1);
        let scored = score_completion(&reminder(Frequency::Once, created), &progress, now);
        assert_eq!(
            scored.details.bonus_message,
            "You earned 10 XP! +10 XP (Quick Completion!) +5 XP (2-day streak!) Total: 25 XP."
        );
    }

    #[test]
    fn test_snooze_floors_xp_at_zero() {
        for starting_xp in 0..SNOOZE_PENALTY_XP {
            let progress = UserProgress {
                xp: starting_xp,
                current_streak: 0,
                last_completion_date: None,
            };
            let scored = score_snooze(&progress);
            assert_eq!(scored.progress.xp, 0);
        }
    }

    #[test]
    fn test_snooze_deducts_full_penalty_when_affordable() {
        let progress = UserProgress {
            xp: 40,
            current_streak: 0,
            last_completion_date: None,
        };
        let scored = score_snooze(&progress);
        assert_eq!(scored.progress.xp, 40 - SNOOZE_PENALTY_XP);
        assert_eq!(scored.details.xp_earned.total, -SNOOZE_PENALTY_XP);
    }

    #[test]
    fn test_snooze_always_resets_streak_and_date() {
        let progress = UserProgress {
            xp: 100,
            current_streak: 7,
            last_completion_date: Some(date(2024, 3, 2)),
        };
        let scored = score_snooze(&progress);
        assert_eq!(scored.progress.current_streak, 0);
        assert_eq!(scored.progress.last_completion_date, None);
        assert_eq!(scored.details.new_streak, 0);
    }

    #[test]
    fn test_snooze_message_mentions_streak_only_when_above_one() {
        let long = UserProgress {
            xp: 100,
            current_streak: 3,
            last_completion_date: Some(date(2024, 3, 2)),
        };
        assert_eq!(
            score_snooze(&long).details.bonus_message,
            "Reminder snoozed. You lost 5 XP. Your 3-day streak was reset."
        );

        let short = UserProgress {
            xp: 100,
            current_streak: 1,
            last_completion_date: Some(date(2024, 3, 2)),
        };
        assert_eq!(
            score_snooze(&short).details.bonus_message,
            "Reminder snoozed. You lost 5 XP."
        );
    }

    #[test]
    fn test_completion_after_snooze_same_day_restarts_at_one() {
        // Snooze wiped the last-completion date, so a completion later the
        // same day starts a fresh streak rather than resuming the old one.
        let progress = UserProgress {
            xp: 100,
            current_streak: 5,
            last_completion_date: Some(date(2024, 3, 2)),
        };
        let snoozed = score_snooze(&progress).progress;
        let now = at(2024, 3, 2, 21, 0);
        let scored = score_completion(&reminder(Frequency::Daily, now), &snoozed, now);
        assert_eq!(scored.progress.current_streak, 1);
        assert_eq!(scored.details.xp_earned.streak_bonus, 0);
    }
}
