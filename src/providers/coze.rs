use super::{decode_reply, Provider};
use crate::models::{BotChatRequest, BotChatResponse, Error, Result};
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_ENDPOINT: &str = "https://api.coze.cn/open_api/v2/chat";
pub const DEFAULT_USER: &str = "oneshot-chat";

pub struct CozeProvider {
    api_key: String,
    bot_id: String,
    user: String,
    custom_variables: HashMap<String, String>,
    endpoint: String,
}

impl CozeProvider {
    pub fn new(api_key: String, bot_id: String) -> Self {
        Self {
            api_key,
            bot_id,
            user: DEFAULT_USER.to_string(),
            custom_variables: HashMap::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_variables.insert(key.into(), value.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Provider for CozeProvider {
    fn name(&self) -> &str {
        "Coze"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn build_request(&self, prompt: &str) -> Result<Value> {
        let request = BotChatRequest {
            bot_id: self.bot_id.clone(),
            user: self.user.clone(),
            query: prompt.to_string(),
            chat_history: Vec::new(),
            stream: false,
            custom_variables: self.custom_variables.clone(),
        };
        Ok(serde_json::to_value(request)?)
    }

    fn parse_response(&self, body: &[u8]) -> Result<String> {
        const PATH: &str = "messages[0].content";

        let response: BotChatResponse = decode_reply(body, PATH)?;
        response
            .messages
            .and_then(|messages| messages.into_iter().next())
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::Shape(PATH.to_string()))
    }
}
