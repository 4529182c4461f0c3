use crate::client::ChatClient;
use crate::models::DEFAULT_ERROR_PREFIX;
use crate::providers::Provider;
use crate::transport::{HttpTransport, Transport};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

pub const DEFAULT_PLACEHOLDER: &str = "思考中...";

/// What a piece of text written to a `TextTarget` stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Placeholder,
    Reply,
    Error,
}

/// Somewhere reply text can be written: a terminal line, a widget, a buffer.
pub trait TextTarget: Send + Sync {
    fn set_text(&self, text: &str, kind: TextKind);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Reply(String),
    Failed(String),
    /// A newer click was issued before this one resolved; nothing was written.
    Stale,
}

/// Wires a trigger to a `ChatClient`. Each click gets a sequence number and
/// only the latest click may overwrite the target.
pub struct Binder<P, T = HttpTransport> {
    client: Arc<ChatClient<P, T>>,
    placeholder: String,
    error_prefix: String,
    latest: AtomicU64,
    in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<P: Provider, T: Transport> Binder<P, T> {
    pub fn new(client: Arc<ChatClient<P, T>>) -> Self {
        Self {
            client,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            error_prefix: DEFAULT_ERROR_PREFIX.to_string(),
            latest: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.error_prefix = prefix.into();
        self
    }

    pub fn client(&self) -> &ChatClient<P, T> {
        &self.client
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn click(&self, prompt: &str, target: &impl TextTarget) -> ClickOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight::enter(&self.in_flight);

        target.set_text(&self.placeholder, TextKind::Placeholder);
        let result = self.client.ask(prompt).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            log::warn!(
                "{}: discarding reply for click #{} superseded by a newer click",
                self.client.provider().name(),
                ticket
            );
            return ClickOutcome::Stale;
        }

        match result {
            Ok(reply) => {
                target.set_text(&reply, TextKind::Reply);
                ClickOutcome::Reply(reply)
            }
            Err(e) => {
                let text = e.render(&self.error_prefix);
                target.set_text(&text, TextKind::Error);
                ClickOutcome::Failed(text)
            }
        }
    }
}
