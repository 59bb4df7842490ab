// ABOUTME: Workout timer stack: format parsing, tick-driven state machine, async runner
// ABOUTME: Defines TimerConfig and re-exports the parser, machine, and runner types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Workout Timer
//!
//! Everything that turns a workout's format line into a running clock:
//!
//! - [`format`] parses free text ("20-Minute AMRAP") into a [`TimerConfig`]
//! - [`machine`] is the synchronous tick-driven state machine
//! - [`runner`] drives the machine from a tokio task at one tick per second
//!
//! The machine is pure and testable without a runtime; the runner is the
//! only place a recurring callback exists.

pub mod format;
pub mod machine;
pub mod runner;

pub use format::parse_format;
pub use machine::{TimerCue, TimerPhase, WorkoutTimer};
pub use runner::{TimerHandle, TimerUpdate};

use serde::{Deserialize, Serialize};

/// Cap applied when a format string matches no parsing rule (15 minutes)
pub const DEFAULT_CAP_SECONDS: u32 = 15 * 60;

/// Direction the workout clock moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Clock starts at the full duration and runs down to zero (AMRAP, intervals)
    Countdown,
    /// Clock starts at zero and runs up to the cap (for-time workouts)
    CountUp,
}

/// Timer configuration derived once from a workout's format string
///
/// Immutable for the session; [`machine::WorkoutTimer`] reads it on every
/// reset and restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Direction of the clock
    pub kind: TimerKind,
    /// Starting clock value in seconds (full duration for countdowns, 0 for count-ups)
    pub duration_seconds: u32,
    /// Hard cap in seconds, set for count-up clocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_seconds: Option<u32>,
}

impl TimerConfig {
    /// Countdown clock starting at `duration_seconds`
    #[must_use]
    pub const fn countdown(duration_seconds: u32) -> Self {
        Self {
            kind: TimerKind::Countdown,
            duration_seconds,
            cap_seconds: None,
        }
    }

    /// Count-up clock starting at zero and capped at `cap_seconds`
    #[must_use]
    pub const fn count_up(cap_seconds: u32) -> Self {
        Self {
            kind: TimerKind::CountUp,
            duration_seconds: 0,
            cap_seconds: Some(cap_seconds),
        }
    }
}

impl Default for TimerConfig {
    /// The parser's fallback: a 15-minute count-up clock
    fn default() -> Self {
        Self::count_up(DEFAULT_CAP_SECONDS)
    }
}
