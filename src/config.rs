use crate::models::{Error, Result, DEFAULT_ERROR_PREFIX};
use crate::providers::{CozeProvider, DeepSeekProvider};
use crate::ui::binder::DEFAULT_PLACEHOLDER;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct DeepSeekConfig {
    pub api_key: String,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub endpoint: Option<String>,
}

impl DeepSeekConfig {
    pub fn build(&self) -> DeepSeekProvider {
        let mut provider = DeepSeekProvider::new(self.api_key.clone());
        if let Some(model) = &self.model {
            provider = provider.with_model(model.as_str());
        }
        if let Some(prompt) = &self.system_prompt {
            provider = provider.with_system_prompt(prompt.as_str());
        }
        if let Some(endpoint) = &self.endpoint {
            provider = provider.with_endpoint(endpoint.as_str());
        }
        provider
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CozeConfig {
    pub api_key: String,
    pub bot_id: String,
    pub user: Option<String>,
    pub endpoint: Option<String>,
    /// From `COZE_VAR_<NAME>`, keyed by lowercased `<name>`.
    pub variables: HashMap<String, String>,
}

impl CozeConfig {
    pub fn build(&self) -> CozeProvider {
        let mut provider = CozeProvider::new(self.api_key.clone(), self.bot_id.clone());
        if let Some(user) = &self.user {
            provider = provider.with_user(user.as_str());
        }
        if let Some(endpoint) = &self.endpoint {
            provider = provider.with_endpoint(endpoint.as_str());
        }
        for (key, value) in &self.variables {
            provider = provider.with_variable(key.as_str(), value.as_str());
        }
        provider
    }
}

/// Everything read from the environment at startup. Nothing downstream
/// consults the environment again.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub deepseek: Option<DeepSeekConfig>,
    pub coze: Option<CozeConfig>,
    pub error_prefix: String,
    pub placeholder: String,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let deepseek = get("DEEPSEEK_API_KEY").map(|api_key| DeepSeekConfig {
            api_key,
            model: get("DEEPSEEK_MODEL"),
            system_prompt: get("DEEPSEEK_SYSTEM_PROMPT"),
            endpoint: get("DEEPSEEK_ENDPOINT"),
        });

        let coze = match (get("COZE_API_KEY"), get("COZE_BOT_ID")) {
            (Some(api_key), Some(bot_id)) => Some(CozeConfig {
                api_key,
                bot_id,
                user: get("COZE_USER"),
                endpoint: get("COZE_ENDPOINT"),
                variables: vars
                    .iter()
                    .filter_map(|(k, v)| {
                        let name = k.strip_prefix("COZE_VAR_")?;
                        Some((name.to_lowercase(), v.clone()))
                    })
                    .collect(),
            }),
            (Some(_), None) => {
                return Err(Error::Config("COZE_BOT_ID must be set alongside COZE_API_KEY".to_string()))
            }
            _ => None,
        };

        if deepseek.is_none() && coze.is_none() {
            return Err(Error::Config(
                "set DEEPSEEK_API_KEY or COZE_API_KEY/COZE_BOT_ID in the environment or .env file"
                    .to_string(),
            ));
        }

        let timeout = match get("ONESHOT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| Error::Config(format!("ONESHOT_TIMEOUT_SECS is not a number: {}", raw)))?;
                if secs == 0 {
                    return Err(Error::Config(
                        "ONESHOT_TIMEOUT_SECS must be at least 1; unset it for no timeout".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        // Prefix keeps its trailing space, so it is read untrimmed.
        let error_prefix = vars
            .get("ONESHOT_ERROR_PREFIX")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_ERROR_PREFIX.to_string());

        Ok(Self {
            deepseek,
            coze,
            error_prefix,
            placeholder: get("ONESHOT_PLACEHOLDER").unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            timeout,
        })
    }
}
