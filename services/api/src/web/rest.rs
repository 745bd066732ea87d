//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::state::AppState;
use crate::web::validate;
use reminder_core::domain::{
    Action, CompletionDetails, Frequency, Reminder, ReminderPatch, DEFAULT_REMINDER_ICON,
    DEFAULT_REMINDER_TIME, DEFAULT_REMINDER_XP,
};
use reminder_core::icons;
use reminder_core::ports::PortError;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        delete_reminder_handler,
        get_progress_handler,
        suggest_icon_handler,
        suggest_time_handler,
    ),
    components(
        schemas(
            DeleteReminderResponse,
            ProgressResponse,
            IconSuggestionRequest,
            IconSuggestionResponse,
            TimeSuggestionRequest,
            TimeSuggestionResponse,
        )
    ),
    tags(
        (name = "Reminder API", description = "Reminders with gamified completion scoring.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The body of a `PUT /reminders/{id}` request: either an action verb or a
/// set of field updates. `completed` and `xpValue` keys are silently ignored.
#[derive(Deserialize)]
struct UpdateReminderBody {
    action: Option<Action>,
    #[serde(flatten)]
    patch: ReminderPatch,
}

/// The envelope returned by `PUT /reminders/{id}`. `completionDetails` is
/// present only when an action was actually processed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminderResponse {
    reminder: Reminder,
    #[serde(skip_serializing_if = "Option::is_none")]
    completion_details: Option<CompletionDetails>,
    user_data: UserData,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    xp: i64,
    current_streak: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReminderRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
    time: String,
    frequency: Frequency,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    xp_value: Option<i64>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReminderResponse {
    message: String,
    deleted_title: String,
}

/// The current gamification snapshot.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    xp: i64,
    current_streak: u32,
    last_completion_date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct IconSuggestionRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IconSuggestionResponse {
    suggested_icon_name: String,
    reasoning: String,
}

#[derive(Deserialize, ToSchema)]
pub struct TimeSuggestionRequest {
    description: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSuggestionResponse {
    title: String,
    description: String,
    suggested_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_icon: Option<String>,
    reasoning: String,
}

//=========================================================================================
// REST API Handlers: Reminders
//=========================================================================================

/// Parses the opaque path id. Anything that is not a known reminder id,
/// well-formed or not, surfaces as the same 404.
fn parse_reminder_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::Port(PortError::NotFound(id.to_string())))
}

pub async fn list_reminders_handler(State(state): State<AppState>) -> Json<Vec<Reminder>> {
    Json(state.engine.list().await)
}

pub async fn get_reminder_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Reminder>, ApiError> {
    let id = parse_reminder_id(&id)?;
    let reminder = state.engine.get(id).await?;
    Ok(Json(reminder))
}

pub async fn create_reminder_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let req: CreateReminderRequest =
        serde_json::from_str(&body).map_err(|e| ApiError::bad_create(e.to_string()))?;

    validate::validate_title(&req.title).map_err(ApiError::bad_create)?;
    if let Some(description) = &req.description {
        validate::validate_description(description).map_err(ApiError::bad_create)?;
    }
    validate::validate_time(&req.time).map_err(ApiError::bad_create)?;
    if let Some(icon) = &req.icon {
        validate::validate_icon(icon).map_err(ApiError::bad_create)?;
    }

    let icon = match req.icon.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => icons::resolve(name).to_string(),
        None => DEFAULT_REMINDER_ICON.to_string(),
    };
    let reminder = Reminder::new(
        req.title,
        req.description.filter(|d| !d.is_empty()),
        req.time,
        req.frequency,
        icon,
        req.xp_value.unwrap_or(DEFAULT_REMINDER_XP),
    );

    let created = state.engine.insert(reminder).await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handles both forms of `PUT /reminders/{id}`: an `action` body routes
/// through the scoring engine, anything else is a generic field update.
pub async fn update_reminder_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<UpdateReminderResponse>, ApiError> {
    let id = parse_reminder_id(&id)?;
    let body: UpdateReminderBody =
        serde_json::from_str(&body).map_err(|e| ApiError::bad_update(e.to_string()))?;

    let (reminder, completion_details) = match body.action {
        Some(action) => {
            let applied = state.engine.apply_action(id, action, Utc::now()).await?;
            (applied.reminder, applied.details)
        }
        None => {
            validate::validate_patch(&body.patch).map_err(ApiError::bad_update)?;
            let updated = state.engine.apply_patch(id, body.patch).await?;
            (updated, None)
        }
    };

    let progress = state.engine.progress().await;
    Ok(Json(UpdateReminderResponse {
        reminder,
        completion_details,
        user_data: UserData {
            xp: progress.xp,
            current_streak: progress.current_streak,
        },
    }))
}

/// Delete a reminder by id.
#[utoipa::path(
    delete,
    path = "/reminders/{id}",
    params(
        ("id" = String, Path, description = "The unique ID of the reminder.")
    ),
    responses(
        (status = 200, description = "Reminder deleted successfully", body = DeleteReminderResponse),
        (status = 404, description = "Reminder not found")
    )
)]
pub async fn delete_reminder_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteReminderResponse>, ApiError> {
    let id = parse_reminder_id(&id)?;
    let removed = state.engine.delete(id).await?;
    Ok(Json(DeleteReminderResponse {
        message: "Reminder deleted successfully".to_string(),
        deleted_title: removed.title,
    }))
}

/// Get the current XP / streak snapshot.
#[utoipa::path(
    get,
    path = "/progress",
    responses(
        (status = 200, description = "Current user progress", body = ProgressResponse)
    )
)]
pub async fn get_progress_handler(State(state): State<AppState>) -> Json<ProgressResponse> {
    let progress = state.engine.progress().await;
    Json(ProgressResponse {
        xp: progress.xp,
        current_streak: progress.current_streak,
        last_completion_date: progress.last_completion_date,
    })
}

//=========================================================================================
// REST API Handlers: Suggestions
//=========================================================================================

// The suggestion collaborator is best-effort by contract: any transport,
// timeout, or validation failure is replaced by a fixed local fallback and
// never surfaced to the caller as an error.

/// Suggest an icon for a reminder from its title and description.
#[utoipa::path(
    post,
    path = "/suggestions/icon",
    request_body = IconSuggestionRequest,
    responses(
        (status = 200, description = "An icon suggestion (or the default fallback)", body = IconSuggestionResponse)
    )
)]
pub async fn suggest_icon_handler(
    State(state): State<AppState>,
    Json(req): Json<IconSuggestionRequest>,
) -> Json<IconSuggestionResponse> {
    let call = state
        .icon_adapter
        .suggest_icon(&req.title, req.description.as_deref());

    match tokio::time::timeout(state.config.suggestion_timeout, call).await {
        Ok(Ok(suggestion)) => Json(IconSuggestionResponse {
            suggested_icon_name: icons::resolve(&suggestion.suggested_icon_name).to_string(),
            reasoning: suggestion.reasoning,
        }),
        Ok(Err(e)) => {
            warn!("Icon suggestion failed, using fallback: {e}");
            Json(fallback_icon_suggestion())
        }
        Err(_) => {
            warn!("Icon suggestion timed out, using fallback");
            Json(fallback_icon_suggestion())
        }
    }
}

/// Draft a complete reminder (title, time, icon) from a free-text description.
#[utoipa::path(
    post,
    path = "/suggestions/time",
    request_body = TimeSuggestionRequest,
    responses(
        (status = 200, description = "A reminder draft (or the default fallback)", body = TimeSuggestionResponse)
    )
)]
pub async fn suggest_time_handler(
    State(state): State<AppState>,
    Json(req): Json<TimeSuggestionRequest>,
) -> Json<TimeSuggestionResponse> {
    let call = state.time_adapter.suggest_time(&req.description);

    match tokio::time::timeout(state.config.suggestion_timeout, call).await {
        Ok(Ok(suggestion)) => {
            let suggested_time = if validate::is_valid_time(&suggestion.suggested_time) {
                suggestion.suggested_time
            } else {
                DEFAULT_REMINDER_TIME.to_string()
            };
            Json(TimeSuggestionResponse {
                title: suggestion.title,
                description: suggestion.description,
                suggested_time,
                suggested_icon: suggestion
                    .suggested_icon
                    .map(|name| icons::resolve(&name).to_string()),
                reasoning: suggestion.reasoning,
            })
        }
        Ok(Err(e)) => {
            warn!("Time suggestion failed, using fallback: {e}");
            Json(fallback_time_suggestion(&req.description))
        }
        Err(_) => {
            warn!("Time suggestion timed out, using fallback");
            Json(fallback_time_suggestion(&req.description))
        }
    }
}

fn fallback_icon_suggestion() -> IconSuggestionResponse {
    IconSuggestionResponse {
        suggested_icon_name: DEFAULT_REMINDER_ICON.to_string(),
        reasoning: "No specific icon could be determined, defaulting to a generic list icon."
            .to_string(),
    }
}

fn fallback_time_suggestion(description: &str) -> TimeSuggestionResponse {
    let title: Vec<&str> = description.split_whitespace().take(5).collect();
    TimeSuggestionResponse {
        title: title.join(" "),
        description: description.to_string(),
        suggested_time: DEFAULT_REMINDER_TIME.to_string(),
        suggested_icon: Some("Bell".to_string()),
        reasoning: "No suggestion was available; defaulting to a morning reminder.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_time_suggestion_truncates_title_to_five_words() {
        let fallback =
            fallback_time_suggestion("take my vitamins after breakfast every single day");
        assert_eq!(fallback.title, "take my vitamins after breakfast");
        assert_eq!(fallback.suggested_time, DEFAULT_REMINDER_TIME);
        assert_eq!(
            fallback.description,
            "take my vitamins after breakfast every single day"
        );
    }

    #[test]
    fn test_update_body_ignores_protected_keys() {
        let body: UpdateReminderBody = serde_json::from_value(serde_json::json!({
            "title": "New title",
            "completed": true,
            "xpValue": 9999
        }))
        .unwrap();
        assert!(body.action.is_none());
        assert_eq!(body.patch.title.as_deref(), Some("New title"));
        // `completed` and `xpValue` have nowhere to land in a patch.
    }

    #[test]
    fn test_update_body_rejects_unknown_action() {
        let result = serde_json::from_value::<UpdateReminderBody>(serde_json::json!({
            "action": "explode"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_reminder_id_maps_garbage_to_not_found() {
        let err = parse_reminder_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::Port(PortError::NotFound(_))));
    }
}
