use crate::models::{Error, Result};
use crate::providers::Provider;
use crate::transport::{HttpTransport, Transport};

/// Performs exactly one request/response exchange per `ask` with a single
/// provider. Holds no per-call state.
pub struct ChatClient<P, T = HttpTransport> {
    provider: P,
    transport: T,
}

impl<P: Provider> ChatClient<P, HttpTransport> {
    pub fn new(provider: P) -> Self {
        Self::with_transport(provider, HttpTransport::new())
    }
}

impl<P: Provider, T: Transport> ChatClient<P, T> {
    pub fn with_transport(provider: P, transport: T) -> Self {
        Self { provider, transport }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One exchange with the provider. Failures are logged here and left to
    /// the caller to render with `Error::render`.
    pub async fn ask(&self, prompt: &str) -> Result<String> {
        let result = self.exchange(prompt).await;
        if let Err(e) = &result {
            log::warn!("{} request failed: {}", self.provider.name(), e);
        }
        result
    }

    async fn exchange(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::InvalidPrompt);
        }

        let body = self.provider.build_request(prompt)?;
        log::debug!(
            "{}: POST {} ({} chars)",
            self.provider.name(),
            self.provider.endpoint(),
            prompt.chars().count()
        );

        let reply = self
            .transport
            .post_json(self.provider.endpoint(), self.provider.api_key(), &body)
            .await?;

        if !reply.is_success() {
            return Err(Error::Status {
                status: reply.status,
                body: String::from_utf8_lossy(&reply.body).into_owned(),
            });
        }

        self.provider.parse_response(&reply.body)
    }
}
