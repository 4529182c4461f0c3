use crate::models::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

mod coze;
mod deepseek;

pub use coze::CozeProvider;
pub use deepseek::DeepSeekProvider;

/// Knows one provider's endpoint, request body and reply path.
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn build_request(&self, prompt: &str) -> Result<Value>;
    /// Extracts the reply text, unmodified, from a raw response body.
    fn parse_response(&self, body: &[u8]) -> Result<String>;
}

/// Parses `body` as JSON, then as `R`. A body that is JSON but does not fit
/// `R` is a shape error at `path`, not a decode error.
fn decode_reply<R: DeserializeOwned>(body: &[u8], path: &str) -> Result<R> {
    let value: Value = serde_json::from_slice(body)?;
    serde_json::from_value(value).map_err(|e| {
        log::debug!("reply does not match expected shape: {}", e);
        Error::Shape(path.to_string())
    })
}
