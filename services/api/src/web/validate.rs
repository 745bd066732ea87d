//! services/api/src/web/validate.rs
//!
//! Field validation for reminder create/update payloads. Bounds mirror the
//! frontend's form schema so both ends reject the same inputs.

use std::sync::OnceLock;

use regex::Regex;

use reminder_core::domain::ReminderPatch;

/// `HH:MM`, 24-hour.
fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid time regex"))
}

/// Returns true if `time` is a well-formed `HH:MM` 24-hour time of day.
pub fn is_valid_time(time: &str) -> bool {
    time_pattern().is_match(time)
}

pub fn validate_title(title: &str) -> Result<(), String> {
    let len = title.chars().count();
    if len < 3 {
        return Err("Title must be at least 3 characters.".to_string());
    }
    if len > 100 {
        return Err("Title must be at most 100 characters.".to_string());
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > 500 {
        return Err("Description must be at most 500 characters.".to_string());
    }
    Ok(())
}

pub fn validate_time(time: &str) -> Result<(), String> {
    if !is_valid_time(time) {
        return Err("Invalid time format. Use HH:MM.".to_string());
    }
    Ok(())
}

pub fn validate_icon(icon: &str) -> Result<(), String> {
    // Empty is allowed; it means "keep the existing icon or fall back".
    if icon.chars().count() > 50 {
        return Err("Icon name too long.".to_string());
    }
    Ok(())
}

/// Validates every field present on a patch; absent fields are fine.
pub fn validate_patch(patch: &ReminderPatch) -> Result<(), String> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(description) = &patch.description {
        validate_description(description)?;
    }
    if let Some(time) = &patch.time {
        validate_time(time)?;
    }
    if let Some(icon) = &patch.icon {
        validate_icon(icon)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_pattern_accepts_24_hour_times() {
        for time in ["00:00", "09:30", "19:59", "23:59"] {
            assert!(is_valid_time(time), "{time} should be valid");
        }
    }

    #[test]
    fn test_time_pattern_rejects_malformed_times() {
        for time in ["24:00", "12:60", "9:30", "09:3", "0930", "morning", ""] {
            assert!(!is_valid_time(time), "{time} should be invalid");
        }
    }

    #[test]
    fn test_title_length_bounds() {
        assert!(validate_title("ab").is_err());
        assert!(validate_title("abc").is_ok());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_description_length_bound() {
        assert!(validate_description(&"x".repeat(500)).is_ok());
        assert!(validate_description(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_patch_checks_only_present_fields() {
        assert!(validate_patch(&ReminderPatch::default()).is_ok());

        let bad_time = ReminderPatch {
            time: Some("25:00".to_string()),
            ..Default::default()
        };
        assert!(validate_patch(&bad_time).is_err());

        let empty_icon = ReminderPatch {
            icon: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_patch(&empty_icon).is_ok());
    }
}
