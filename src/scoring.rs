// ABOUTME: Score formatting and parsing for workout results
// ABOUTME: M:SS clock strings, human-readable score lines, and the best-score comparator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Scoring
//!
//! Pure helpers around [`WorkoutScore`]: clock formatting (`M:SS` with no
//! hour rollover), forgiving duration parsing that falls back to `0`, the
//! display line for a logged score, and an explicit comparator deciding
//! which of several scores on the same workout is the athlete's best.

use crate::models::{ScoreType, WorkoutScore};

/// Format a second count as `M:SS`
///
/// Minutes are unpadded and never roll over into hours: `3661` formats as
/// `"61:01"`, matching how gym clocks display long time-capped workouts.
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{minutes}:{secs:02}")
}

/// Parse a duration string back into seconds
///
/// Exactly two `:`-separated parts read as `M:SS`; anything else is read as
/// a plain second count. Unparseable input yields `0` rather than an error,
/// since score entry fields accept free text.
#[must_use]
pub fn parse_duration(text: &str) -> u32 {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() == 2 {
        let minutes: u32 = parts[0].trim().parse().unwrap_or(0);
        let seconds: u32 = parts[1].trim().parse().unwrap_or(0);
        minutes.saturating_mul(60).saturating_add(seconds)
    } else {
        text.trim().parse().unwrap_or(0)
    }
}

/// Human-readable display line for a logged score
#[must_use]
pub fn format_score(score: &WorkoutScore) -> String {
    match score.score_type {
        ScoreType::RoundsReps => {
            let rounds = score.rounds.unwrap_or(0);
            match score.reps {
                Some(reps) if reps > 0 => format!("{rounds} rounds + {reps} reps"),
                _ => format!("{rounds} rounds"),
            }
        }
        ScoreType::Time => format_duration(score.time_seconds.unwrap_or(0)),
        ScoreType::Completed => "Completed".to_owned(),
    }
}

/// Pick the best score out of a slice
///
/// The comparator is explicit: lowest finish time wins `time` scores,
/// highest `(rounds, reps)` wins `rounds_reps` scores, and the most recent
/// entry wins bare completions. A measured score always beats a bare
/// completion. Ties on the measure go to the earliest `completed_at`, the
/// original achievement. Works on any ordering of the input.
#[must_use]
pub fn best_score(scores: &[WorkoutScore]) -> Option<&WorkoutScore> {
    scores.iter().reduce(|best, candidate| {
        if beats(candidate, best) {
            candidate
        } else {
            best
        }
    })
}

/// Whether `a` strictly beats `b`
fn beats(a: &WorkoutScore, b: &WorkoutScore) -> bool {
    use std::cmp::Ordering;

    match measured_rank(a).cmp(&measured_rank(b)) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match (a.score_type, b.score_type) {
            (ScoreType::Time, ScoreType::Time) => {
                let time_a = a.time_seconds.unwrap_or(u32::MAX);
                let time_b = b.time_seconds.unwrap_or(u32::MAX);
                time_a < time_b || (time_a == time_b && a.completed_at < b.completed_at)
            }
            (ScoreType::RoundsReps, ScoreType::RoundsReps) => {
                let key_a = (a.rounds.unwrap_or(0), a.reps.unwrap_or(0));
                let key_b = (b.rounds.unwrap_or(0), b.reps.unwrap_or(0));
                key_a > key_b || (key_a == key_b && a.completed_at < b.completed_at)
            }
            (ScoreType::Completed, ScoreType::Completed) => a.completed_at > b.completed_at,
            // A workout does not mix time and rounds_reps scores; if data
            // does, the incumbent stands
            _ => false,
        },
    }
}

const fn measured_rank(score: &WorkoutScore) -> u8 {
    match score.score_type {
        ScoreType::Completed => 0,
        ScoreType::Time | ScoreType::RoundsReps => 1,
    }
}
