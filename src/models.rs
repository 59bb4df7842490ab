// ABOUTME: Core data models for the Chalkbox training engine
// ABOUTME: Defines Workout, WorkoutScore, Squad, SquadEvent and feed records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Domain Models
//!
//! Records shared across the engine: workouts and their exercises, logged
//! scores, squads, squad events, and activity feed entries. All identifiers
//! are opaque strings (UUID v4 at creation time) so stores can persist them
//! without caring about the generator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single movement inside a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Movement name (e.g. "Thruster", "Pull-up")
    pub name: String,
    /// Rep scheme, free-form (e.g. "21-15-9", "5x5")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Prescribed load, free-form (e.g. "95 lb", "bodyweight")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<String>,
}

impl Exercise {
    /// Create an exercise with just a movement name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: None,
            load: None,
        }
    }

    /// Attach a rep scheme
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Attach a prescribed load
    #[must_use]
    pub fn with_load(mut self, load: impl Into<String>) -> Self {
        self.load = Some(load.into());
        self
    }
}

/// A programmed workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout ID
    pub id: String,
    /// Short title (e.g. "Fran")
    pub title: String,
    /// Format line driving the timer (e.g. "20-Minute AMRAP")
    pub format: String,
    /// Longer description or coaching notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered movement list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<Exercise>,
    /// Calendar date the workout is programmed for, if scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Squad this workout belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squad_id: Option<String>,
    /// User who created the workout
    pub created_by: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Create a workout with a fresh ID and the current timestamp
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        format: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            format: format.into(),
            description: None,
            exercises: Vec::new(),
            scheduled_date: None,
            squad_id: None,
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the exercise list
    #[must_use]
    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    /// Schedule the workout on a calendar date
    #[must_use]
    pub const fn scheduled_on(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    /// Assign the workout to a squad
    #[must_use]
    pub fn for_squad(mut self, squad_id: impl Into<String>) -> Self {
        self.squad_id = Some(squad_id.into());
        self
    }
}

/// How a workout result is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    /// Finish time in seconds (lower is better)
    Time,
    /// Rounds plus extra reps (higher is better)
    RoundsReps,
    /// Done / not done, no measured result
    Completed,
}

impl ScoreType {
    /// Stable string tag matching the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::RoundsReps => "rounds_reps",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A logged result for one athlete on one workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutScore {
    /// Unique score ID
    pub id: String,
    /// Workout this score belongs to
    pub workout_id: String,
    /// Athlete who logged the score
    pub user_id: String,
    /// How the result is measured
    pub score_type: ScoreType,
    /// Completed full rounds, for `rounds_reps` scores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    /// Extra reps past the last full round, for `rounds_reps` scores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Finish time in whole seconds, for `time` scores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_seconds: Option<u32>,
    /// Whether the workout was done as prescribed
    pub rx: bool,
    /// When the athlete finished
    pub completed_at: DateTime<Utc>,
}

impl WorkoutScore {
    /// Log a finish time in seconds
    #[must_use]
    pub fn time(
        workout_id: impl Into<String>,
        user_id: impl Into<String>,
        time_seconds: u32,
    ) -> Self {
        Self {
            id: new_id(),
            workout_id: workout_id.into(),
            user_id: user_id.into(),
            score_type: ScoreType::Time,
            rounds: None,
            reps: None,
            time_seconds: Some(time_seconds),
            rx: true,
            completed_at: Utc::now(),
        }
    }

    /// Log rounds plus extra reps
    #[must_use]
    pub fn rounds_reps(
        workout_id: impl Into<String>,
        user_id: impl Into<String>,
        rounds: u32,
        reps: u32,
    ) -> Self {
        Self {
            id: new_id(),
            workout_id: workout_id.into(),
            user_id: user_id.into(),
            score_type: ScoreType::RoundsReps,
            rounds: Some(rounds),
            reps: Some(reps),
            time_seconds: None,
            rx: true,
            completed_at: Utc::now(),
        }
    }

    /// Log a bare completion with no measured result
    #[must_use]
    pub fn completed(workout_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            workout_id: workout_id.into(),
            user_id: user_id.into(),
            score_type: ScoreType::Completed,
            rounds: None,
            reps: None,
            time_seconds: None,
            rx: true,
            completed_at: Utc::now(),
        }
    }

    /// Mark the score as scaled rather than as prescribed
    #[must_use]
    pub const fn scaled(mut self) -> Self {
        self.rx = false;
        self
    }
}

/// A training group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    /// Unique squad ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional blurb shown on the squad page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Member user IDs, founder first
    pub member_ids: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Squad {
    /// Create a squad with the founder as its first member
    #[must_use]
    pub fn new(name: impl Into<String>, founder_id: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: None,
            member_ids: vec![founder_id.into()],
            created_at: Utc::now(),
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the given user belongs to the squad
    #[must_use]
    pub fn has_member(&self, user_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == user_id)
    }
}

/// A scheduled squad gathering (throwdown, seminar, social)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadEvent {
    /// Unique event ID
    pub id: String,
    /// Squad hosting the event
    pub squad_id: String,
    /// Event title
    pub title: String,
    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the event starts
    pub starts_at: DateTime<Utc>,
    /// Free-form location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// User IDs who have RSVPed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendee_ids: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl SquadEvent {
    /// Create an event with a fresh ID and no attendees
    #[must_use]
    pub fn new(
        squad_id: impl Into<String>,
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            squad_id: squad_id.into(),
            title: title.into(),
            description: None,
            starts_at,
            location: None,
            attendee_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// What an activity feed entry announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// An athlete posted a score
    ScorePosted,
    /// A squad event was created
    EventCreated,
    /// Free-form announcement
    Announcement,
}

/// One entry in a squad or global activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Unique entry ID
    pub id: String,
    /// User the entry is about
    pub user_id: String,
    /// Squad feed the entry belongs to, or `None` for the global feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squad_id: Option<String>,
    /// Entry category
    pub kind: FeedKind,
    /// Human-readable message
    pub message: String,
    /// Related workout, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
    /// Related score, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl FeedEntry {
    /// Create a feed entry with a fresh ID and the current timestamp
    #[must_use]
    pub fn new(user_id: impl Into<String>, kind: FeedKind, message: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            squad_id: None,
            kind,
            message: message.into(),
            workout_id: None,
            score_id: None,
            created_at: Utc::now(),
        }
    }

    /// Direct the entry to a squad feed
    #[must_use]
    pub fn in_squad(mut self, squad_id: impl Into<String>) -> Self {
        self.squad_id = Some(squad_id.into());
        self
    }

    /// Link a workout
    #[must_use]
    pub fn about_workout(mut self, workout_id: impl Into<String>) -> Self {
        self.workout_id = Some(workout_id.into());
        self
    }

    /// Link a score
    #[must_use]
    pub fn about_score(mut self, score_id: impl Into<String>) -> Self {
        self.score_id = Some(score_id.into());
        self
    }
}
