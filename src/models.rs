use rustyline::error::ReadlineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix put in front of an error message when it is shown to the user.
pub const DEFAULT_ERROR_PREFIX: &str = "请求出错: ";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

// DeepSeek (OpenAI-style chat completions)

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

// Response side is all optional: a missing or null field is a shape
// problem, reported by the provider, not a decode failure.

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

// Coze bot chat

#[derive(Debug, Serialize)]
pub struct BotChatRequest {
    pub bot_id: String,
    pub user: String,
    pub query: String,
    pub chat_history: Vec<ChatMessage>,
    pub stream: bool,
    pub custom_variables: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct BotMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BotChatResponse {
    #[serde(default)]
    pub messages: Option<Vec<BotMessage>>,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response shape: missing {0}")]
    Shape(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("prompt must not be empty")]
    InvalidPrompt,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal error: {0}")]
    Terminal(#[from] clearscreen::Error),
    #[error("readline error: {0}")]
    Readline(String),
}

impl Error {
    /// Display form for a text element: `prefix` followed by the message.
    pub fn render(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Error::Readline(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_prepends_prefix() {
        let err = Error::Shape("choices[0].message.content".to_string());
        assert_eq!(
            err.render(DEFAULT_ERROR_PREFIX),
            "请求出错: unexpected response shape: missing choices[0].message.content"
        );
    }

    #[test]
    fn bot_request_serializes_empty_history() {
        let req = BotChatRequest {
            bot_id: "bot".to_string(),
            user: "u".to_string(),
            query: "hi".to_string(),
            chat_history: Vec::new(),
            stream: false,
            custom_variables: HashMap::new(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["chat_history"], serde_json::json!([]));
        assert_eq!(value["stream"], serde_json::json!(false));
        assert_eq!(value["custom_variables"], serde_json::json!({}));
    }
}
