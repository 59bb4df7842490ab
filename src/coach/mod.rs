// ABOUTME: AI coaching engine for conversational workout programming
// ABOUTME: Classification, prompt assembly, chat sessions, and command application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Coach Engine
//!
//! Everything behind the in-app coach. A turn flows through this module in
//! order: [`classifier`] decides which training domains the message
//! touches, [`prompts`] assembles the domain-aware system prompt,
//! [`chat`] runs the provider round trip and history bookkeeping,
//! [`commands`] lifts structured commands out of the reply, and
//! [`actions`] applies accepted commands to the workout store.

pub mod actions;
pub mod chat;
pub mod classifier;
pub mod commands;
pub mod knowledge;
pub mod prompts;

pub use actions::{apply_command, apply_commands, AppliedCommand, PlannedWorkout};
pub use chat::{CoachReply, CoachSession};
pub use classifier::{classify, classify_keywords};
pub use commands::{extract_commands, BlockDiagnostic, CoachCommand, CommandExtraction};
pub use knowledge::TrainingDomain;
pub use prompts::assemble_system_prompt;
