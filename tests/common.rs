// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Provides a scripted LLM provider with queued replies and failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox
#![allow(
    dead_code,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use chalkbox::errors::AppError;
use chalkbox::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};

/// LLM provider that replays a queue of scripted outcomes
///
/// Each `complete` call captures the request for later assertions, then pops
/// the next scripted outcome. An exhausted script is an internal error so a
/// test that sends more requests than it scripted fails loudly.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Queue a successful reply
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
        self
    }

    /// Queue a failure
    pub fn with_failure(self, error: AppError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sleep this long inside every `complete` call (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests captured so far, oldest first
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only()
    }

    fn default_model(&self) -> &str {
        "scripted-1"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["scripted-1"]
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("scripted provider is out of replies")));
        outcome.map(|content| ChatResponse {
            content,
            model: "scripted-1".to_string(),
            usage: None,
            finish_reason: Some("stop".to_string()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}
