// ABOUTME: Calendar service for querying and placing workouts on dates
// ABOUTME: Day and range reads plus scheduling and rescheduling of a workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::errors::{AppError, AppResult};
use crate::models::Workout;
use crate::store::{WorkoutFilter, WorkoutPatch, WorkoutStore};

/// One calendar day with its scheduled workouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    /// The calendar date
    pub date: NaiveDate,
    /// Workouts scheduled on that date, ordered by title
    pub workouts: Vec<Workout>,
}

/// Workouts scheduled on a single date
///
/// # Errors
///
/// Returns store errors on listing failure.
pub async fn workouts_on(store: &dyn WorkoutStore, date: NaiveDate) -> AppResult<Vec<Workout>> {
    store
        .list_workouts(&WorkoutFilter::new().scheduled_on(date))
        .await
}

/// Workouts across a date range, grouped by day
///
/// Business rules:
/// - Both bounds are inclusive
/// - Days with nothing scheduled are omitted
/// - Days come back ascending, workouts within a day ordered by title
///
/// # Errors
///
/// Returns `InvalidInput` when `from` is after `until`, and store errors on
/// listing failure.
pub async fn workouts_between(
    store: &dyn WorkoutStore,
    from: NaiveDate,
    until: NaiveDate,
) -> AppResult<Vec<DayPlan>> {
    if from > until {
        return Err(AppError::invalid_input(format!(
            "date range start {from} is after end {until}"
        )));
    }

    let workouts = store
        .list_workouts(&WorkoutFilter::new().scheduled_between(from, until))
        .await?;

    let mut by_day: BTreeMap<NaiveDate, Vec<Workout>> = BTreeMap::new();
    for workout in workouts {
        // The range filter only returns scheduled workouts
        if let Some(date) = workout.scheduled_date {
            by_day.entry(date).or_default().push(workout);
        }
    }

    Ok(by_day
        .into_iter()
        .map(|(date, mut workouts)| {
            workouts.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
            DayPlan { date, workouts }
        })
        .collect())
}

/// Schedule or reschedule a workout onto a date
///
/// # Errors
///
/// Returns `ResourceNotFound` when the workout does not exist.
pub async fn schedule_workout(
    store: &dyn WorkoutStore,
    workout_id: &str,
    date: NaiveDate,
) -> AppResult<Workout> {
    store
        .update_workout(workout_id, &WorkoutPatch::new().schedule_on(date))
        .await
}
