#![allow(dead_code)]

use async_trait::async_trait;
use oneshot_chat::{HttpReply, Result, Transport};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub bearer: String,
    pub body: Value,
}

/// Answers each call from a closure keyed on the call index, recording what
/// was sent.
pub struct ScriptedTransport<F> {
    respond: F,
    calls: Mutex<Vec<RecordedCall>>,
    count: AtomicUsize,
    delays: Vec<Duration>,
}

impl<F> ScriptedTransport<F>
where
    F: Fn(usize) -> Result<HttpReply> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Mutex::new(Vec::new()),
            count: AtomicUsize::new(0),
            delays: Vec::new(),
        }
    }

    /// Delay applied to the n-th call before it answers.
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = delays;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> Transport for ScriptedTransport<F>
where
    F: Fn(usize) -> Result<HttpReply> + Send + Sync,
{
    async fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<HttpReply> {
        let index = self.count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            bearer: bearer.to_string(),
            body: body.clone(),
        });
        if let Some(delay) = self.delays.get(index) {
            tokio::time::sleep(*delay).await;
        }
        (self.respond)(index)
    }
}

pub fn ok(body: &str) -> Result<HttpReply> {
    Ok(HttpReply {
        status: 200,
        body: body.as_bytes().to_vec(),
    })
}

pub fn status(code: u16, body: &str) -> Result<HttpReply> {
    Ok(HttpReply {
        status: code,
        body: body.as_bytes().to_vec(),
    })
}
