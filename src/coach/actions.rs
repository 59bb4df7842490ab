// ABOUTME: Executes extracted coach commands against the workout store
// ABOUTME: Create, delete, and propose flows with per-id delete accounting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Coach Command Application
//!
//! Bridges [`CoachCommand`] payloads to store mutations. Applying is
//! separate from extraction so callers can show a proposed plan, wait for
//! the user to accept, and only then let `CREATE_PLAN` touch the store.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::commands::{
    CoachCommand, ACTION_CREATE_PLAN, ACTION_DELETE_WORKOUTS, ACTION_PROPOSE_PLAN,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{Exercise, Workout};
use crate::store::WorkoutStore;

/// One workout as the coach describes it inside a command payload
///
/// Looser than [`Workout`]: only the title is required, and ids or
/// ownership are assigned at creation time, not by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Workout title
    pub title: String,
    /// Timer format line, e.g. `"20-minute AMRAP"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Coaching notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Movements with schemes and loads
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<Exercise>,
    /// Calendar date the coach is targeting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<chrono::NaiveDate>,
}

/// Result of applying one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AppliedCommand {
    /// `CREATE_PLAN` persisted these workouts
    Created {
        /// The stored records, ids assigned
        workouts: Vec<Workout>,
    },
    /// `DELETE_WORKOUTS` ran over the requested ids
    Deleted {
        /// Ids that were removed
        deleted: Vec<String>,
        /// Ids the store did not know
        missing: Vec<String>,
    },
    /// `PROPOSE_PLAN` parsed a preview, nothing was stored
    Proposed {
        /// The proposed workouts for display
        workouts: Vec<PlannedWorkout>,
    },
    /// The action verb was not recognized
    Skipped {
        /// The verb as the model wrote it
        action: String,
        /// Why it was skipped
        reason: String,
    },
}

/// Apply one coach command to the store on behalf of `user_id`
///
/// Business rules:
/// - Action verbs match case-insensitively; `delete` is accepted as a
///   shorthand for `DELETE_WORKOUTS`
/// - `PROPOSE_PLAN` validates its payload but never touches the store
/// - `DELETE_WORKOUTS` keeps going past unknown ids and reports them as
///   missing instead of failing the whole command
/// - Unrecognized verbs are skipped, not errors, so one odd block cannot
///   sink a multi-command reply
///
/// # Errors
///
/// Returns `InvalidFormat` when a payload is missing its required field or
/// has the wrong shape, and propagates store failures other than missing
/// delete targets.
pub async fn apply_command(
    store: &dyn WorkoutStore,
    user_id: &str,
    command: &CoachCommand,
) -> AppResult<AppliedCommand> {
    match command.action.to_uppercase().as_str() {
        ACTION_CREATE_PLAN => create_plan(store, user_id, command).await,
        ACTION_PROPOSE_PLAN => {
            let workouts = planned_workouts(command)?;
            Ok(AppliedCommand::Proposed { workouts })
        }
        ACTION_DELETE_WORKOUTS | "DELETE" => delete_workouts(store, command).await,
        other => {
            warn!(action = %other, "skipping unrecognized coach command");
            Ok(AppliedCommand::Skipped {
                action: command.action.clone(),
                reason: "unrecognized action".to_string(),
            })
        }
    }
}

/// Apply a batch of commands in order, stopping at the first failure
pub async fn apply_commands(
    store: &dyn WorkoutStore,
    user_id: &str,
    commands: &[CoachCommand],
) -> AppResult<Vec<AppliedCommand>> {
    let mut applied = Vec::with_capacity(commands.len());
    for command in commands {
        applied.push(apply_command(store, user_id, command).await?);
    }
    Ok(applied)
}

async fn create_plan(
    store: &dyn WorkoutStore,
    user_id: &str,
    command: &CoachCommand,
) -> AppResult<AppliedCommand> {
    let planned = planned_workouts(command)?;
    let mut workouts = Vec::with_capacity(planned.len());
    for plan in planned {
        let workout = build_workout(plan, user_id);
        store.create_workout(&workout).await?;
        workouts.push(workout);
    }
    info!(count = workouts.len(), "coach plan persisted");
    Ok(AppliedCommand::Created { workouts })
}

async fn delete_workouts(
    store: &dyn WorkoutStore,
    command: &CoachCommand,
) -> AppResult<AppliedCommand> {
    let ids: Vec<String> = payload_field(command, "workout_ids")?;
    let mut deleted = Vec::new();
    let mut missing = Vec::new();
    for id in ids {
        match store.delete_workout(&id).await {
            Ok(()) => deleted.push(id),
            Err(error) if error.code == ErrorCode::ResourceNotFound => missing.push(id),
            Err(error) => return Err(error),
        }
    }
    info!(
        deleted = deleted.len(),
        missing = missing.len(),
        "coach delete applied"
    );
    Ok(AppliedCommand::Deleted { deleted, missing })
}

/// Parse the `workouts` array out of a plan command
fn planned_workouts(command: &CoachCommand) -> AppResult<Vec<PlannedWorkout>> {
    payload_field(command, "workouts")
}

/// Deserialize one required payload field
fn payload_field<T: serde::de::DeserializeOwned>(
    command: &CoachCommand,
    field: &str,
) -> AppResult<T> {
    let value = command.payload.get(field).ok_or_else(|| {
        AppError::invalid_format(format!("{} command is missing \"{field}\"", command.action))
    })?;
    serde_json::from_value(value.clone()).map_err(|error| {
        AppError::invalid_format(format!(
            "{} command has a malformed \"{field}\": {error}",
            command.action
        ))
    })
}

/// Turn a planned workout into a storable record owned by `user_id`
fn build_workout(plan: PlannedWorkout, user_id: &str) -> Workout {
    let mut workout = Workout::new(plan.title, plan.format.unwrap_or_default(), user_id)
        .with_exercises(plan.exercises);
    if let Some(description) = plan.description {
        workout = workout.with_description(description);
    }
    if let Some(date) = plan.scheduled_date {
        workout = workout.scheduled_on(date);
    }
    workout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::commands::extract_commands;
    use crate::store::MemoryStore;

    fn command_from(reply: &str) -> CoachCommand {
        extract_commands(reply).commands.remove(0)
    }

    #[tokio::test]
    async fn create_plan_persists_each_workout() {
        let store = MemoryStore::new();
        let command = command_from(
            "```json\n{\"action\": \"CREATE_PLAN\", \"workouts\": [\
             {\"title\": \"Monday\", \"format\": \"20-minute AMRAP\"},\
             {\"title\": \"Tuesday\"}]}\n```",
        );

        let applied = apply_command(&store, "user-1", &command).await.unwrap();
        let AppliedCommand::Created { workouts } = applied else {
            panic!("expected Created");
        };
        assert_eq!(workouts.len(), 2);
        for workout in &workouts {
            let stored = store.get_workout(&workout.id).await.unwrap().unwrap();
            assert_eq!(stored.created_by, "user-1");
        }
    }

    #[tokio::test]
    async fn propose_plan_parses_but_stores_nothing() {
        let store = MemoryStore::new();
        let command = command_from(
            "```json\n{\"action\": \"PROPOSE_PLAN\", \"workouts\": [{\"title\": \"Preview\"}]}\n```",
        );

        let applied = apply_command(&store, "user-1", &command).await.unwrap();
        let AppliedCommand::Proposed { workouts } = applied else {
            panic!("expected Proposed");
        };
        assert_eq!(workouts[0].title, "Preview");
        assert!(store
            .list_workouts(&crate::store::WorkoutFilter::new())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_reports_missing_ids_without_failing() {
        let store = MemoryStore::new();
        let workout = Workout::new("Doomed", "For Time (5-minute cap)", "user-1");
        store.create_workout(&workout).await.unwrap();

        let reply = format!(
            "```json\n{{\"action\": \"delete\", \"workout_ids\": [\"{}\", \"ghost\"]}}\n```",
            workout.id
        );
        let applied = apply_command(&store, "user-1", &command_from(&reply))
            .await
            .unwrap();
        let AppliedCommand::Deleted { deleted, missing } = applied else {
            panic!("expected Deleted");
        };
        assert_eq!(deleted, vec![workout.id.clone()]);
        assert_eq!(missing, vec!["ghost".to_string()]);
        assert!(store.get_workout(&workout.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_action_is_skipped() {
        let store = MemoryStore::new();
        let command = command_from("```json\n{\"action\": \"DANCE\"}\n```");
        let applied = apply_command(&store, "user-1", &command).await.unwrap();
        assert!(matches!(applied, AppliedCommand::Skipped { .. }));
    }

    #[tokio::test]
    async fn missing_workouts_payload_is_invalid_format() {
        let store = MemoryStore::new();
        let command = command_from("```json\n{\"action\": \"CREATE_PLAN\"}\n```");
        let error = apply_command(&store, "user-1", &command).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidFormat);
    }
}
