// ABOUTME: Configuration management module for centralized engine settings
// ABOUTME: Handles environment-driven configuration for logging and the chat model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! Configuration module for the Chalkbox engine
//!
//! Environment-only configuration: every tunable is read from environment
//! variables once at startup and passed explicitly to the components that
//! need it. There is no config file format.

/// Environment and engine configuration
pub mod environment;

pub use environment::{EngineConfig, Environment, LlmSettings, LogLevel};
