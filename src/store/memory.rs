// ABOUTME: In-process record store over concurrent hash maps
// ABOUTME: Default backend for the CLI and test suites, no persistence across runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{WorkoutFilter, WorkoutPatch, WorkoutStore};
use crate::errors::{AppError, AppResult};
use crate::models::{FeedEntry, Squad, SquadEvent, Workout, WorkoutScore};

/// In-memory [`WorkoutStore`] backend
///
/// Listings are assembled by scanning the relevant map, so this backend is
/// for interactive and test workloads, not large datasets. Records live as
/// long as the store does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    workouts: DashMap<String, Workout>,
    scores: DashMap<String, WorkoutScore>,
    squads: DashMap<String, Squad>,
    events: DashMap<String, SquadEvent>,
    feed: DashMap<String, FeedEntry>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Insert a record under a fresh id, rejecting id collisions
fn insert_new<V: Clone>(
    map: &DashMap<String, V>,
    kind: &str,
    id: &str,
    record: &V,
) -> AppResult<String> {
    match map.entry(id.to_string()) {
        Entry::Occupied(_) => Err(AppError::already_exists(format!("{kind} {id}"))),
        Entry::Vacant(vacant) => {
            vacant.insert(record.clone());
            Ok(id.to_string())
        }
    }
}

#[async_trait::async_trait]
impl WorkoutStore for MemoryStore {
    async fn create_workout(&self, workout: &Workout) -> AppResult<String> {
        insert_new(&self.workouts, "workout", &workout.id, workout)
    }

    async fn get_workout(&self, workout_id: &str) -> AppResult<Option<Workout>> {
        Ok(self.workouts.get(workout_id).map(|entry| entry.value().clone()))
    }

    async fn update_workout(&self, workout_id: &str, patch: &WorkoutPatch) -> AppResult<Workout> {
        let mut entry = self
            .workouts
            .get_mut(workout_id)
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))?;
        patch.apply(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn delete_workout(&self, workout_id: &str) -> AppResult<()> {
        if self.workouts.remove(workout_id).is_none() {
            return Err(AppError::not_found(format!("workout {workout_id}")));
        }
        Ok(())
    }

    async fn list_workouts(&self, filter: &WorkoutFilter) -> AppResult<Vec<Workout>> {
        let mut matches: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matches)
    }

    async fn create_score(&self, score: &WorkoutScore) -> AppResult<String> {
        insert_new(&self.scores, "score", &score.id, score)
    }

    async fn list_scores(
        &self,
        workout_id: &str,
        user_id: Option<&str>,
    ) -> AppResult<Vec<WorkoutScore>> {
        let mut matches: Vec<WorkoutScore> = self
            .scores
            .iter()
            .filter(|entry| {
                entry.workout_id == workout_id
                    && user_id.is_none_or(|user| entry.user_id == user)
            })
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matches)
    }

    async fn list_user_scores(&self, user_id: &str) -> AppResult<Vec<WorkoutScore>> {
        let mut matches: Vec<WorkoutScore> = self
            .scores
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matches)
    }

    async fn create_squad(&self, squad: &Squad) -> AppResult<String> {
        insert_new(&self.squads, "squad", &squad.id, squad)
    }

    async fn get_squad(&self, squad_id: &str) -> AppResult<Option<Squad>> {
        Ok(self.squads.get(squad_id).map(|entry| entry.value().clone()))
    }

    async fn list_squads_for_member(&self, user_id: &str) -> AppResult<Vec<Squad>> {
        let mut matches: Vec<Squad> = self
            .squads
            .iter()
            .filter(|entry| entry.has_member(user_id))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matches)
    }

    async fn add_squad_member(&self, squad_id: &str, user_id: &str) -> AppResult<Squad> {
        let mut entry = self
            .squads
            .get_mut(squad_id)
            .ok_or_else(|| AppError::not_found(format!("squad {squad_id}")))?;
        if !entry.has_member(user_id) {
            entry.value_mut().member_ids.push(user_id.to_string());
        }
        Ok(entry.value().clone())
    }

    async fn create_event(&self, event: &SquadEvent) -> AppResult<String> {
        insert_new(&self.events, "event", &event.id, event)
    }

    async fn get_event(&self, event_id: &str) -> AppResult<Option<SquadEvent>> {
        Ok(self.events.get(event_id).map(|entry| entry.value().clone()))
    }

    async fn list_events(
        &self,
        squad_id: &str,
        from: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<SquadEvent>> {
        let mut matches: Vec<SquadEvent> = self
            .events
            .iter()
            .filter(|entry| {
                entry.squad_id == squad_id
                    && from.is_none_or(|cutoff| entry.starts_at >= cutoff)
            })
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matches)
    }

    async fn add_event_attendee(&self, event_id: &str, user_id: &str) -> AppResult<SquadEvent> {
        let mut entry = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| AppError::not_found(format!("event {event_id}")))?;
        if !entry.attendee_ids.iter().any(|id| id == user_id) {
            entry.value_mut().attendee_ids.push(user_id.to_string());
        }
        Ok(entry.value().clone())
    }

    async fn create_feed_entry(&self, entry: &FeedEntry) -> AppResult<String> {
        insert_new(&self.feed, "feed entry", &entry.id, entry)
    }

    async fn list_feed(&self, squad_id: Option<&str>, limit: usize) -> AppResult<Vec<FeedEntry>> {
        let mut matches: Vec<FeedEntry> = self
            .feed
            .iter()
            .filter(|entry| {
                squad_id.is_none_or(|squad| entry.squad_id.as_deref() == Some(squad))
            })
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        matches.truncate(limit);
        Ok(matches)
    }
}
