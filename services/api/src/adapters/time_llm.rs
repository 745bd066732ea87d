//! services/api/src/adapters/time_llm.rs
//!
//! This module contains the adapter that drafts a full reminder (title, time,
//! icon) from a free-text description. It implements the
//! `TimeSuggestionService` port from the `core` crate.

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
use crate::web::validate;
use reminder_core::ports::{PortError, PortResult, TimeSuggestion, TimeSuggestionService};

const SYSTEM_INSTRUCTIONS: &str = "You are a helpful assistant that suggests reminder details based on user input. Always respond with valid JSON.";

/// The JSON shape the model is asked to produce.
#[derive(Deserialize)]
struct TimeSuggestionPayload {
    title: String,
    description: String,
    time: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// An adapter that implements `TimeSuggestionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiTimeAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTimeAdapter {
    /// Creates a new `OpenAiTimeAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn build_prompt(description: &str) -> String {
        format!(
            "Given this reminder description: \"{description}\"\n\n\
             Please analyze it and suggest a complete reminder with the following information:\n\
             1. A clear, concise title (max 5 words)\n\
             2. The full description\n\
             3. The most appropriate time of day for this reminder\n\
             4. A relevant Lucide icon name in CamelCase (e.g. 'Coffee', 'BookOpen', 'Dumbbell', 'Pill', 'ShoppingCart', 'Bell')\n\
             5. A one-sentence reasoning for the suggested time\n\n\
             Return the response in this exact JSON format:\n\
             {{\n\
               \"title\": \"string\",\n\
               \"description\": \"string\",\n\
               \"time\": \"string (in HH:MM 24-hour format)\",\n\
               \"icon\": \"string\",\n\
               \"reasoning\": \"string\"\n\
             }}"
        )
    }
}

#[async_trait]
impl TimeSuggestionService for OpenAiTimeAdapter {
    async fn suggest_time(&self, description: &str) -> PortResult<TimeSuggestion> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_INSTRUCTIONS)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(Self::build_prompt(description))
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(300u32)
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
            .ok_or_else(|| PortError::Unexpected("No time suggestion generated".to_string()))?;

        let payload: TimeSuggestionPayload = serde_json::from_str(strip_code_fences(&content))
            .map_err(|e| PortError::Unexpected(format!("Malformed suggestion payload: {e}")))?;

        // Reject payloads the caller could not store anyway; the handler then
        // falls back to its fixed local default.
        if !validate::is_valid_time(&payload.time) {
            return Err(PortError::Unexpected(format!(
                "Suggested time '{}' is not HH:MM",
                payload.time
            )));
        }
        if payload.title.trim().is_empty() {
            return Err(PortError::Unexpected("Suggested title is empty".to_string()));
        }

        Ok(TimeSuggestion {
            title: payload.title,
            description: payload.description,
            suggested_time: payload.time,
            suggested_icon: payload.icon.filter(|icon| !icon.trim().is_empty()),
            reasoning: payload.reasoning.unwrap_or_default(),
        })
    }
}
