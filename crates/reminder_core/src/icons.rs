//! crates/reminder_core/src/icons.rs
//!
//! A closed registry of the Lucide icon names the UI knows how to render.
//! Icon strings are validated here at the boundary instead of being trusted
//! at render time; anything unknown resolves to the default icon.

use crate::domain::DEFAULT_REMINDER_ICON;

/// Every icon name the frontend can render, in canonical CamelCase form.
pub const KNOWN_ICONS: &[&str] = &[
    "AlarmClock",
    "Bell",
    "Bike",
    "BookOpen",
    "Brain",
    "Briefcase",
    "Brush",
    "Bus",
    "CalendarDays",
    "Camera",
    "Car",
    "CheckCircle",
    "ClipboardList",
    "Clock",
    "Cloud",
    "Coffee",
    "Crown",
    "Droplet",
    "Dumbbell",
    "Eye",
    "FileText",
    "Film",
    "Flag",
    "Flame",
    "Folder",
    "Gamepad2",
    "Gift",
    "GlassWater",
    "Globe",
    "GraduationCap",
    "Hammer",
    "Heart",
    "Home",
    "Key",
    "Laptop",
    "Lock",
    "Mail",
    "Map",
    "Medal",
    "MessageSquare",
    "Microscope",
    "Moon",
    "Music",
    "Pencil",
    "Phone",
    "Pill",
    "Plane",
    "ShoppingCart",
    "Star",
    "Stethoscope",
    "Sun",
    "Syringe",
    "Thermometer",
    "Train",
    "Trophy",
    "Utensils",
    "Wrench",
];

/// Returns true if `name` names a renderable icon (case-insensitive).
pub fn is_known(name: &str) -> bool {
    KNOWN_ICONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
}

/// Resolves a caller-supplied icon name to its canonical registry entry.
///
/// Empty or unrecognized names resolve to [`DEFAULT_REMINDER_ICON`].
pub fn resolve(name: &str) -> &'static str {
    let trimmed = name.trim();
    KNOWN_ICONS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(trimmed))
        .copied()
        .unwrap_or(DEFAULT_REMINDER_ICON)
}
