pub mod rest;
pub mod state;
pub mod validate;

// Re-export the handlers to make them easily accessible to the binary that
// builds the web server router.
pub use rest::{
    create_reminder_handler, delete_reminder_handler, get_progress_handler, get_reminder_handler,
    list_reminders_handler, suggest_icon_handler, suggest_time_handler, update_reminder_handler,
};
