// ABOUTME: Integration tests for the workout format parser
// ABOUTME: Covers the rule cascade, case handling, and the documented fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chalkbox::timer::{parse_format, TimerConfig, TimerKind, DEFAULT_CAP_SECONDS};

#[test]
fn test_amrap_becomes_a_countdown() {
    let config = parse_format("20-minute AMRAP");
    assert_eq!(config, TimerConfig::countdown(1200));
}

#[test]
fn test_amrap_with_spaces_and_mixed_case() {
    assert_eq!(parse_format("12 Minute AMRAP"), TimerConfig::countdown(720));
    assert_eq!(parse_format("7-MINUTE amrap"), TimerConfig::countdown(420));
}

#[test]
fn test_for_time_cap_becomes_a_count_up() {
    let config = parse_format("For Time (30-minute cap)");
    assert_eq!(config.kind, TimerKind::CountUp);
    assert_eq!(config.duration_seconds, 0);
    assert_eq!(config.cap_seconds, Some(1800));
}

#[test]
fn test_rounds_for_time_uses_the_cap_not_the_rounds() {
    let config = parse_format("5 Rounds For Time (25-minute cap)");
    assert_eq!(config, TimerConfig::count_up(1500));
}

#[test]
fn test_intervals_count_down_one_interval() {
    assert_eq!(
        parse_format("Intervals (4 min on / 2 min off)"),
        TimerConfig::countdown(240)
    );
    assert_eq!(
        parse_format("Interval (10 min)"),
        TimerConfig::countdown(600)
    );
}

#[test]
fn test_amrap_wording_embedded_in_a_longer_line() {
    let config = parse_format("Open 24.1: 15-minute AMRAP of burpees and snatches");
    assert_eq!(config, TimerConfig::countdown(900));
}

#[test]
fn test_unrecognized_formats_fall_back_to_fifteen_minute_count_up() {
    for text in ["EMOM 10", "Strength: back squat 5x5", "", "just move today"] {
        let config = parse_format(text);
        assert_eq!(config, TimerConfig::count_up(DEFAULT_CAP_SECONDS), "{text:?}");
        assert_eq!(config.cap_seconds, Some(900));
    }
}

#[test]
fn test_absurd_minute_counts_fall_back_instead_of_overflowing() {
    let config = parse_format("99999999999-minute AMRAP");
    assert_eq!(config, TimerConfig::count_up(DEFAULT_CAP_SECONDS));
}

#[test]
fn test_first_matching_rule_wins() {
    // Both the AMRAP and interval patterns could claim this line; the
    // cascade checks AMRAP first.
    let config = parse_format("20-minute AMRAP with intervals (2 min on)");
    assert_eq!(config, TimerConfig::countdown(1200));
}
