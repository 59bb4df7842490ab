// ABOUTME: Main library entry point for the Chalkbox training engine
// ABOUTME: Workout timers, scoring, social records, and the AI coach behind the app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy; nothing in this crate
//   needs raw pointers or FFI
#![deny(unsafe_code)]

//! # Chalkbox
//!
//! The headless core of a CrossFit-style training app: everything that is
//! not a screen lives here. The host application (mobile or otherwise)
//! supplies UI, navigation, and push delivery; this crate owns the workout
//! timer, scoring, scheduling, squad records, and the AI coach.
//!
//! ## Features
//!
//! - **Workout timers**: free-text format lines like `"20-minute AMRAP"`
//!   parsed into typed configs, run by an explicit state machine with a
//!   3-2-1-Go intro and an async tick runner
//! - **Scoring**: `M:SS` formatting and parsing, score display strings, and
//!   an explicit best-score comparator
//! - **AI coach**: keyword-plus-LLM intent classification, domain-aware
//!   prompt assembly, and structured command extraction from replies
//! - **Social records**: squads, events, RSVPs, and an activity feed over a
//!   pluggable async store
//!
//! ## Architecture
//!
//! - **Timer**: format parser, phase state machine, tokio-based runner
//! - **Coach**: classifier, prompts, chat session, command application
//! - **LLM**: provider abstraction with a Gemini implementation
//! - **Store**: record-store trait plus the in-memory reference backend
//! - **Services**: scheduling, scoreboard, and social business rules
//!
//! ## Example Usage
//!
//! ```rust
//! use chalkbox::scoring::format_duration;
//! use chalkbox::timer::parse_format;
//!
//! let config = parse_format("20-minute AMRAP");
//! assert_eq!(config.duration_seconds, 1200);
//! assert_eq!(format_duration(config.duration_seconds), "20:00");
//! ```

/// AI coaching engine: classification, prompts, chat, and commands
pub mod coach;

/// Configuration management from environment variables
pub mod config;

/// Unified error handling system with standard error codes
pub mod errors;

/// LLM provider abstraction for AI chat integration
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for workouts, scores, squads, events, and the feed
pub mod models;

/// Score formatting, parsing, and the best-score comparator
pub mod scoring;

/// Domain service layer for scheduling, scoreboard, and social flows
pub mod services;

/// Workout store abstraction and the in-memory backend
pub mod store;

/// Workout timer: format parsing, state machine, and async runner
pub mod timer;
