use super::{decode_reply, Provider};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, Error, Result};
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

pub struct DeepSeekProvider {
    api_key: String,
    model: String,
    system_prompt: Option<String>,
    endpoint: String,
}

impl DeepSeekProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Provider for DeepSeekProvider {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn build_request(&self, prompt: &str) -> Result<Value> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage::new("system", system));
        }
        messages.push(ChatMessage::new("user", prompt));

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        };
        Ok(serde_json::to_value(request)?)
    }

    fn parse_response(&self, body: &[u8]) -> Result<String> {
        const PATH: &str = "choices[0].message.content";

        let response: ChatResponse = decode_reply(body, PATH)?;
        response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::Shape(PATH.to_string()))
    }
}
