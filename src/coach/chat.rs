// ABOUTME: Conversational coach session with history, classification, and command capture
// ABOUTME: Rolls the user's message back on failure so a retry never duplicates it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Coach Chat Session
//!
//! One [`CoachSession`] holds one user's running conversation with the
//! coach. Each turn classifies the message, assembles a domain-aware system
//! prompt, sends the full history to the provider, and extracts structured
//! commands from the reply. The session owns the visible history; a failed
//! send removes the just-pushed user message so the caller can retry without
//! duplicating it.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::classifier;
use super::commands::{extract_commands, BlockDiagnostic, CoachCommand};
use super::knowledge::TrainingDomain;
use super::prompts::assemble_system_prompt;
use crate::config::environment::LlmSettings;
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider, MessageRole};

/// Outcome of one successful coach turn
#[derive(Debug, Clone)]
pub struct CoachReply {
    /// Reply text with command blocks stripped
    pub text: String,
    /// Domains the user's message classified into
    pub domains: Vec<TrainingDomain>,
    /// How many structured commands this turn queued
    pub command_count: usize,
    /// Command blocks that failed to parse, with reasons
    pub diagnostics: Vec<BlockDiagnostic>,
}

/// A running conversation with the coach
///
/// `send` takes `&mut self`, so one session has at most one request in
/// flight. Commands accumulate across turns until drained with
/// [`CoachSession::take_commands`].
pub struct CoachSession {
    provider: Arc<dyn LlmProvider>,
    settings: LlmSettings,
    history: Vec<ChatMessage>,
    pending_commands: Vec<CoachCommand>,
}

impl CoachSession {
    /// Create a session backed by the given provider and settings
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, settings: LlmSettings) -> Self {
        Self {
            provider,
            settings,
            history: Vec::new(),
            pending_commands: Vec::new(),
        }
    }

    /// Send one user message and wait for the coach's reply
    ///
    /// Business rules:
    /// - The message joins the visible history before the request goes out
    ///   and is rolled back if the request fails, so a retry sends it once
    /// - The system prompt is reassembled every turn from the message's
    ///   classified domains; it never enters the stored history
    /// - Extracted commands queue on the session, they are not applied here
    /// - The provider call is bounded by the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error when the provider call fails or times out. Every
    /// error from this method is retryable: provider failures that are not
    /// already transient are wrapped as external service errors.
    #[instrument(skip(self, text), fields(provider = self.provider.name(), history_len = self.history.len()))]
    pub async fn send(&mut self, text: &str) -> AppResult<CoachReply> {
        let domains = classifier::classify(
            text,
            Some(self.provider.as_ref()),
            self.settings.timeout,
        )
        .await;
        let system_prompt = assemble_system_prompt(&domains);

        self.history.push(ChatMessage::user(text));

        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(self.history.iter().cloned());

        let mut request = ChatRequest::new(messages);
        if let Some(model) = &self.settings.model {
            request = request.with_model(model.clone());
        }

        let response =
            match tokio::time::timeout(self.settings.timeout, self.provider.complete(&request))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(error)) => {
                    self.history.pop();
                    warn!(error = %error, "coach request failed, user message rolled back");
                    return Err(into_retryable(self.provider.display_name(), error));
                }
                Err(_) => {
                    self.history.pop();
                    warn!("coach request timed out, user message rolled back");
                    return Err(AppError::timeout(
                        self.provider.display_name(),
                        self.settings.timeout.as_secs(),
                    ));
                }
            };

        let extraction = extract_commands(&response.content);
        debug!(
            commands = extraction.commands.len(),
            rejected = extraction.diagnostics.len(),
            "coach turn complete"
        );

        self.history
            .push(ChatMessage::assistant(extraction.display_text.clone()));
        let command_count = extraction.commands.len();
        self.pending_commands.extend(extraction.commands);

        Ok(CoachReply {
            text: extraction.display_text,
            domains,
            command_count,
            diagnostics: extraction.diagnostics,
        })
    }

    /// Drain the commands queued by previous turns, oldest first
    #[must_use]
    pub fn take_commands(&mut self) -> Vec<CoachCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Commands queued so far, without draining them
    #[must_use]
    pub fn pending_commands(&self) -> &[CoachCommand] {
        &self.pending_commands
    }

    /// The visible conversation so far, user and assistant turns only
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Number of user turns in the visible history
    #[must_use]
    pub fn user_turns(&self) -> usize {
        self.history
            .iter()
            .filter(|message| message.role == MessageRole::User)
            .count()
    }

    /// Forget the conversation and any undrained commands
    pub fn reset(&mut self) {
        self.history.clear();
        self.pending_commands.clear();
    }
}

impl std::fmt::Debug for CoachSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachSession")
            .field("provider", &self.provider.name())
            .field("history_len", &self.history.len())
            .field("pending_commands", &self.pending_commands.len())
            .finish_non_exhaustive()
    }
}

/// Guarantee a send failure is safe to retry
fn into_retryable(provider_name: &str, error: AppError) -> AppError {
    if error.code.is_retryable() {
        error
    } else {
        AppError::external_service(provider_name, error.to_string())
    }
}
