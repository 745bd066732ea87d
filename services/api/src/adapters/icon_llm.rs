//! services/api/src/adapters/icon_llm.rs
//!
//! This module contains the adapter for icon suggestions. It implements the
//! `IconSuggestionService` port from the `core` crate against an
//! OpenAI-compatible chat-completion model.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde::Deserialize;

use crate::adapters::strip_code_fences;
use reminder_core::domain::DEFAULT_REMINDER_ICON;
use reminder_core::icons;
use reminder_core::ports::{IconSuggestion, IconSuggestionService, PortError, PortResult};

const SYSTEM_INSTRUCTIONS: &str = "You are a helpful AI assistant that suggests appropriate Lucide icons for reminders. You must respond with ONLY a valid JSON object containing suggestedIconName and reasoning fields. No other text or formatting.";

/// The JSON shape the model is asked to produce.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IconSuggestionPayload {
    suggested_icon_name: String,
    reasoning: String,
}

/// An adapter that implements `IconSuggestionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiIconAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiIconAdapter {
    /// Creates a new `OpenAiIconAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn build_prompt(title: &str, description: Option<&str>) -> String {
        let mut prompt = format!(
            "You are an AI assistant that suggests a suitable icon for a reminder from the Lucide icon library, given its title and optional description. The icon name must be a valid CamelCase name from Lucide (e.g., 'GlassWater', 'Bike', 'BookOpen', 'AlarmClock', 'CalendarDays', 'Mail', 'MessageSquare').\n\n\
             If the title or description is vague or no specific icon seems appropriate, suggest a generic icon like 'ClipboardList' or 'Bell'.\n\n\
             Reminder Title: {title}\n"
        );
        if let Some(description) = description {
            prompt.push_str(&format!("Reminder Description: {description}\n"));
        }
        prompt.push_str(
            "\nConsider the title and description to suggest an icon. Explain your reasoning for choosing that specific icon.\n\
             Format your response as a JSON object with 'suggestedIconName' (string) and 'reasoning' (string) fields.",
        );
        prompt
    }
}

#[async_trait]
impl IconSuggestionService for OpenAiIconAdapter {
    async fn suggest_icon(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> PortResult<IconSuggestion> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_INSTRUCTIONS)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(Self::build_prompt(title, description))
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(200u32)
            .temperature(0.7)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| PortError::Unexpected("No icon suggestion generated".to_string()))?;

        let payload: IconSuggestionPayload = serde_json::from_str(strip_code_fences(&content))
            .map_err(|e| PortError::Unexpected(format!("Malformed suggestion payload: {e}")))?;

        // A model that answered but named nothing still gets the generic icon.
        if payload.suggested_icon_name.trim().is_empty() {
            return Ok(IconSuggestion {
                suggested_icon_name: DEFAULT_REMINDER_ICON.to_string(),
                reasoning: "No specific icon could be determined, defaulting to a generic list icon."
                    .to_string(),
            });
        }

        Ok(IconSuggestion {
            suggested_icon_name: icons::resolve(&payload.suggested_icon_name).to_string(),
            reasoning: payload.reasoning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_parses_fenced_model_output() {
        let raw = "```json\n{\"suggestedIconName\": \"GlassWater\", \"reasoning\": \"Hydration.\"}\n```";
        let payload: IconSuggestionPayload =
            serde_json::from_str(strip_code_fences(raw)).unwrap();
        assert_eq!(payload.suggested_icon_name, "GlassWater");
        assert_eq!(payload.reasoning, "Hydration.");
    }

    #[test]
    fn test_prompt_includes_description_only_when_present() {
        let with = OpenAiIconAdapter::build_prompt("Water plants", Some("the ferns"));
        assert!(with.contains("Reminder Description: the ferns"));

        let without = OpenAiIconAdapter::build_prompt("Water plants", None);
        assert!(!without.contains("Reminder Description"));
        assert!(without.contains("Reminder Title: Water plants"));
    }
}
