// ABOUTME: Storage abstraction for workouts, scores, squads, events, and feed rows
// ABOUTME: Record-store trait with opaque string ids plus the in-memory backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Workout Store
//!
//! The engine treats persistence as a plain record store addressed by opaque
//! string identifiers, with filtered listing for the query shapes the
//! services need. Backends implement [`WorkoutStore`]; [`MemoryStore`] is
//! the bundled in-process backend used by the CLI and the test suites.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::models::{Exercise, FeedEntry, Squad, SquadEvent, Workout, WorkoutScore};

pub mod memory;

pub use memory::MemoryStore;

/// Query filter for workout listings
///
/// All clauses are optional and combine with AND. An empty filter matches
/// every workout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutFilter {
    /// Match workouts scheduled exactly on this date
    pub scheduled_on: Option<NaiveDate>,
    /// Match workouts scheduled on or after this date
    pub scheduled_from: Option<NaiveDate>,
    /// Match workouts scheduled on or before this date
    pub scheduled_until: Option<NaiveDate>,
    /// Match workouts shared with this squad
    pub squad_id: Option<String>,
    /// Match workouts created by this user
    pub created_by: Option<String>,
}

impl WorkoutFilter {
    /// Filter that matches every workout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to workouts scheduled exactly on `date`
    #[must_use]
    pub fn scheduled_on(mut self, date: NaiveDate) -> Self {
        self.scheduled_on = Some(date);
        self
    }

    /// Restrict to workouts scheduled within `from..=until`
    #[must_use]
    pub fn scheduled_between(mut self, from: NaiveDate, until: NaiveDate) -> Self {
        self.scheduled_from = Some(from);
        self.scheduled_until = Some(until);
        self
    }

    /// Restrict to workouts shared with a squad
    #[must_use]
    pub fn in_squad(mut self, squad_id: impl Into<String>) -> Self {
        self.squad_id = Some(squad_id.into());
        self
    }

    /// Restrict to workouts created by a user
    #[must_use]
    pub fn created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = Some(user_id.into());
        self
    }

    /// Whether `workout` satisfies every clause of this filter
    ///
    /// Date clauses only ever match scheduled workouts; an unscheduled
    /// workout fails any date clause.
    #[must_use]
    pub fn matches(&self, workout: &Workout) -> bool {
        if let Some(date) = self.scheduled_on {
            if workout.scheduled_date != Some(date) {
                return false;
            }
        }
        if let Some(from) = self.scheduled_from {
            match workout.scheduled_date {
                Some(scheduled) if scheduled >= from => {}
                _ => return false,
            }
        }
        if let Some(until) = self.scheduled_until {
            match workout.scheduled_date {
                Some(scheduled) if scheduled <= until => {}
                _ => return false,
            }
        }
        if let Some(squad_id) = &self.squad_id {
            if workout.squad_id.as_deref() != Some(squad_id.as_str()) {
                return false;
            }
        }
        if let Some(user_id) = &self.created_by {
            if workout.created_by != *user_id {
                return false;
            }
        }
        true
    }
}

/// Partial update for a stored workout
///
/// `None` fields are left untouched; there is no clause for clearing a
/// field back to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPatch {
    /// Replace the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replace the timer format line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Replace the description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replace the exercise list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
    /// Move the workout to this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Share the workout with this squad
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squad_id: Option<String>,
}

impl WorkoutPatch {
    /// Patch that changes nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new timer format line
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set a new description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the exercise list
    #[must_use]
    pub fn exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = Some(exercises);
        self
    }

    /// Move the workout to `date`
    #[must_use]
    pub fn schedule_on(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    /// Share the workout with a squad
    #[must_use]
    pub fn squad(mut self, squad_id: impl Into<String>) -> Self {
        self.squad_id = Some(squad_id.into());
        self
    }

    /// Apply the set fields of this patch to `workout`
    pub fn apply(&self, workout: &mut Workout) {
        if let Some(title) = &self.title {
            workout.title.clone_from(title);
        }
        if let Some(format) = &self.format {
            workout.format.clone_from(format);
        }
        if let Some(description) = &self.description {
            workout.description = Some(description.clone());
        }
        if let Some(exercises) = &self.exercises {
            workout.exercises.clone_from(exercises);
        }
        if let Some(date) = self.scheduled_date {
            workout.scheduled_date = Some(date);
        }
        if let Some(squad_id) = &self.squad_id {
            workout.squad_id = Some(squad_id.clone());
        }
    }
}

/// Record-store abstraction the services are written against
///
/// All backends must provide a consistent interface: creates return the new
/// record's id, point reads return `Ok(None)` for unknown ids, and updates
/// or deletes of unknown ids are `ResourceNotFound` errors. Scores and feed
/// entries are append-only.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    // ================================
    // Workouts
    // ================================

    /// Persist a new workout and return its id
    async fn create_workout(&self, workout: &Workout) -> AppResult<String>;

    /// Get a workout by id
    async fn get_workout(&self, workout_id: &str) -> AppResult<Option<Workout>>;

    /// Apply a partial update and return the updated workout
    async fn update_workout(&self, workout_id: &str, patch: &WorkoutPatch) -> AppResult<Workout>;

    /// Delete a workout by id
    async fn delete_workout(&self, workout_id: &str) -> AppResult<()>;

    /// List workouts matching the filter, most recently created first
    async fn list_workouts(&self, filter: &WorkoutFilter) -> AppResult<Vec<Workout>>;

    // ================================
    // Scores
    // ================================

    /// Persist a new score and return its id
    async fn create_score(&self, score: &WorkoutScore) -> AppResult<String>;

    /// List scores for a workout, optionally one user's only, newest first
    async fn list_scores(
        &self,
        workout_id: &str,
        user_id: Option<&str>,
    ) -> AppResult<Vec<WorkoutScore>>;

    /// List every score a user has logged across workouts, newest first
    async fn list_user_scores(&self, user_id: &str) -> AppResult<Vec<WorkoutScore>>;

    // ================================
    // Squads
    // ================================

    /// Persist a new squad and return its id
    async fn create_squad(&self, squad: &Squad) -> AppResult<String>;

    /// Get a squad by id
    async fn get_squad(&self, squad_id: &str) -> AppResult<Option<Squad>>;

    /// List the squads a user belongs to, most recently created first
    async fn list_squads_for_member(&self, user_id: &str) -> AppResult<Vec<Squad>>;

    /// Add a member to a squad and return the updated squad
    ///
    /// Adding an existing member is a no-op, not an error.
    async fn add_squad_member(&self, squad_id: &str, user_id: &str) -> AppResult<Squad>;

    // ================================
    // Events
    // ================================

    /// Persist a new event and return its id
    async fn create_event(&self, event: &SquadEvent) -> AppResult<String>;

    /// Get an event by id
    async fn get_event(&self, event_id: &str) -> AppResult<Option<SquadEvent>>;

    /// List a squad's events starting at or after `from`, soonest first
    ///
    /// `None` lists every event the squad has, past ones included.
    async fn list_events(
        &self,
        squad_id: &str,
        from: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<SquadEvent>>;

    /// Add an attendee to an event and return the updated event
    ///
    /// Adding an existing attendee is a no-op, not an error.
    async fn add_event_attendee(&self, event_id: &str, user_id: &str) -> AppResult<SquadEvent>;

    // ================================
    // Activity Feed
    // ================================

    /// Persist a new feed entry and return its id
    async fn create_feed_entry(&self, entry: &FeedEntry) -> AppResult<String>;

    /// List feed entries, newest first, capped at `limit`
    ///
    /// `squad_id` of `None` reads the global feed across squads.
    async fn list_feed(&self, squad_id: Option<&str>, limit: usize) -> AppResult<Vec<FeedEntry>>;
}
