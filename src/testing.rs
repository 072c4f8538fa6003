//! Testing utilities.
//!
//! [`ScriptedProvider`] stands in for a real model so the pipeline can be
//! exercised without network calls.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::llm::{CompletionRequest, LlmProvider};

/// What the provider does when it sees a given system prompt.
#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(String),
}

/// Record of a call made to the scripted provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
}

/// Deterministic [`LlmProvider`] that answers by exact system prompt.
///
/// Calls with an unscripted system prompt fail.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests carrying `system` with `reply`.
    pub fn reply(mut self, system: &str, reply: impl Into<String>) -> Self {
        self.scripts
            .insert(system.to_string(), Script::Reply(reply.into()));
        self
    }

    /// Fail requests carrying `system` with `message`, as a transport error would.
    pub fn fail(mut self, system: &str, message: impl Into<String>) -> Self {
        self.scripts
            .insert(system.to_string(), Script::Fail(message.into()));
        self
    }

    /// Every request seen so far, in call order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                system: request.system.to_string(),
                user: request.user.to_string(),
            });
        }

        match self.scripts.get(request.system) {
            Some(Script::Reply(text)) => Ok(text.clone()),
            Some(Script::Fail(message)) => anyhow::bail!("{}", message),
            None => anyhow::bail!("no scripted reply for this system prompt"),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
