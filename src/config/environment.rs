// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and chat-model configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! Environment-based configuration for the engine

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::warn;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the chat model name
pub const LLM_MODEL_ENV: &str = "CHALKBOX_LLM_MODEL";

/// Environment variable overriding the chat-model request deadline in seconds
pub const LLM_TIMEOUT_ENV: &str = "CHALKBOX_LLM_TIMEOUT_SECS";

/// Default chat-model request deadline in seconds
///
/// The deadline is mandatory: without it a slow network leaves a chat turn
/// "thinking" forever.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Full tracing output
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for behavior toggles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Chat-model settings resolved from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Gemini API key; `None` disables the LLM classification fallback and chat
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model override; `None` uses the provider default
    pub model: Option<String>,
    /// Per-request deadline
    pub timeout: Duration,
}

impl LlmSettings {
    /// Resolve chat-model settings from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = env::var(GEMINI_API_KEY_ENV).ok().filter(|k| !k.is_empty());
        let model = env::var(LLM_MODEL_ENV).ok().filter(|m| !m.is_empty());

        let timeout_secs = env::var(LLM_TIMEOUT_ENV).map_or(DEFAULT_LLM_TIMEOUT_SECS, |raw| {
            raw.parse().unwrap_or_else(|_| {
                warn!(
                    value = %raw,
                    default = DEFAULT_LLM_TIMEOUT_SECS,
                    "Unparseable {} value, using default",
                    LLM_TIMEOUT_ENV
                );
                DEFAULT_LLM_TIMEOUT_SECS
            })
        });

        Self {
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Whether a chat model is configured at all
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Chat-model settings
    pub llm: LlmSettings,
}

impl EngineConfig {
    /// Load engine configuration from environment variables
    ///
    /// Never fails: every setting has a documented default and unparseable
    /// values fall back with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let log_level = env::var("RUST_LOG")
            .map(|v| LogLevel::from_str_or_default(&v))
            .unwrap_or_default();

        let environment = env::var("ENVIRONMENT")
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();

        Self {
            log_level,
            environment,
            llm: LlmSettings::from_env(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            environment: Environment::default(),
            llm: LlmSettings::default(),
        }
    }
}
