// ABOUTME: Workout format string parser producing typed timer configurations
// ABOUTME: Ordered regex cascade with a documented 15-minute count-up fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Timer Format Parser
//!
//! Maps a workout's free-text format line to a [`TimerConfig`]. Rules are
//! evaluated in a fixed order, case-insensitively, and the first match wins;
//! rules never combine. Anything unrecognized falls back to a 15-minute
//! count-up clock, so parsing never fails.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{TimerConfig, DEFAULT_CAP_SECONDS};

/// Regex patterns for the format rules
/// Stored as Option to handle compilation failures gracefully (should never fail for static patterns)
static AMRAP_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 20-Minute AMRAP, 12 minute AMRAP
    Regex::new(r"(?i)(\d+)[-\s]minute\s+amrap").ok()
});

static FOR_TIME_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: For Time (10-minute cap), anchored at the start of the line
    // so round-prefixed variants fall through to the rounds rule below
    Regex::new(r"(?i)^\s*for\s+time\s*\(\s*(\d+)[-\s]minute\s+cap\s*\)").ok()
});

static ROUNDS_FOR_TIME_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 3 Rounds For Time (20-minute cap)
    Regex::new(r"(?i)(\d+)\s+rounds\s+for\s+time\s*\(\s*(\d+)[-\s]minute\s+cap\s*\)").ok()
});

static INTERVALS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: Intervals (4 min on / 2 min off), Interval (5 min)
    Regex::new(r"(?i)intervals?\s*\(\s*(\d+)\s*min").ok()
});

type RuleBuilder = fn(&regex::Captures<'_>) -> Option<TimerConfig>;

/// Ordered rule table; earlier entries win
fn rule_table() -> [(Option<&'static Regex>, RuleBuilder); 4] {
    [
        (AMRAP_PATTERN.as_ref(), amrap_rule),
        (FOR_TIME_PATTERN.as_ref(), for_time_rule),
        (ROUNDS_FOR_TIME_PATTERN.as_ref(), rounds_for_time_rule),
        (INTERVALS_PATTERN.as_ref(), intervals_rule),
    ]
}

fn amrap_rule(caps: &regex::Captures<'_>) -> Option<TimerConfig> {
    let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some(TimerConfig::countdown(minutes.checked_mul(60)?))
}

fn for_time_rule(caps: &regex::Captures<'_>) -> Option<TimerConfig> {
    let cap_minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some(TimerConfig::count_up(cap_minutes.checked_mul(60)?))
}

fn rounds_for_time_rule(caps: &regex::Captures<'_>) -> Option<TimerConfig> {
    // Group 1 is the round count; only the cap drives the clock
    let cap_minutes: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some(TimerConfig::count_up(cap_minutes.checked_mul(60)?))
}

fn intervals_rule(caps: &regex::Captures<'_>) -> Option<TimerConfig> {
    let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some(TimerConfig::countdown(minutes.checked_mul(60)?))
}

/// Parse a workout format line into a timer configuration
///
/// Never fails: an unrecognized format (or a number too large for the clock)
/// yields the default 15-minute count-up configuration.
#[must_use]
pub fn parse_format(format: &str) -> TimerConfig {
    for (pattern, build) in rule_table() {
        let config = pattern
            .and_then(|p| p.captures(format))
            .and_then(|caps| build(&caps));
        if let Some(config) = config {
            return config;
        }
    }

    debug!(format, "no timer rule matched, using default count-up cap");
    TimerConfig::count_up(DEFAULT_CAP_SECONDS)
}
