//! Hosted-model collaborator — the boundary to a chat-completions API.
//!
//! Only reachable from the dialogue engine's fallback arm, when nothing
//! matched locally. The whole conversation history goes out, one reply
//! comes back. Any failure at this boundary — network, auth, a malformed
//! response — is logged and collapsed into a fixed apology string; it is
//! never propagated.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// System turn seeded into every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful restaurant chatbot assistant. \
You can help customers browse the menu, search for dishes, and make reservations. \
Be friendly and professional, provide detailed information about dishes when asked, \
and guide customers through the reservation process. \
Always format prices with 2 decimal places and a dollar sign (e.g., $12.99).";

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

const APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting to my AI service. Please try again later.";

/// One turn of conversation history, in wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        ChatTurn { role: "system", content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatTurn { role: "user", content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatTurn { role: "assistant", content: content.into() }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, thiserror::Error)]
enum AssistantError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response carried no choices")]
    EmptyChoices,
}

/// Blocking client for the hosted assistant.
pub struct Assistant {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl Assistant {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Assistant {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Send the conversation and return the assistant's reply, or the
    /// apology string if anything goes wrong.
    pub fn reply(&self, history: &[ChatTurn]) -> String {
        match self.try_reply(history) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "assistant request failed");
                APOLOGY.to_string()
            }
        }
    }

    fn try_reply(&self, history: &[ChatTurn]) -> Result<String, AssistantError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: history,
            temperature: 0.7,
            max_tokens: 500,
        };

        let response: CompletionResponse = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AssistantError::EmptyChoices)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_turn_roles() {
        assert_eq!(ChatTurn::system("s").role, "system");
        assert_eq!(ChatTurn::user("u").role, "user");
        assert_eq!(ChatTurn::assistant("a").role, "assistant");
    }

    #[test]
    fn test_request_serializes_expected_shape() {
        let turns = vec![ChatTurn::system("sys"), ChatTurn::user("hi")];
        let request = CompletionRequest {
            model: "gpt-4o",
            messages: &turns,
            temperature: 0.7,
            max_tokens: 500,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 500);
    }

    #[test]
    fn test_response_parses_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#;
        let response: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.choices[0].message.content, "Hello!");
    }
}
