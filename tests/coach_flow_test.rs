// ABOUTME: End-to-end tests walking a coach conversation into stored, runnable workouts
// ABOUTME: Covers propose, accept, schedule lookup, timer parsing, scoring, and deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use chalkbox::coach::{apply_command, apply_commands, AppliedCommand, CoachSession};
use chalkbox::config::environment::LlmSettings;
use chalkbox::models::WorkoutScore;
use chalkbox::services::{scheduling, scoreboard};
use chalkbox::store::{MemoryStore, WorkoutFilter, WorkoutStore};
use chalkbox::timer::{parse_format, TimerKind};
use common::ScriptedProvider;

const ATHLETE: &str = "athlete-7";

fn settings() -> LlmSettings {
    LlmSettings {
        api_key: Some("test-key".to_string()),
        model: None,
        timeout: Duration::from_secs(5),
    }
}

const PROPOSAL_REPLY: &str = r#"Two pieces for your week, tell me if the loading works.

```json
{
  "action": "PROPOSE_PLAN",
  "workouts": [
    {
      "title": "Engine Builder",
      "format": "20-Minute AMRAP",
      "exercises": [
        {"name": "Row", "scheme": "250 m"},
        {"name": "Wall Ball", "scheme": "15 reps", "load": "20 lb"}
      ],
      "scheduled_date": "2025-09-01"
    },
    {
      "title": "Leg Day Grinder",
      "format": "3 Rounds For Time (20-minute cap)",
      "description": "Pace the lunges, sprint the row.",
      "scheduled_date": "2025-09-03"
    }
  ]
}
```"#;

const ACCEPTED_REPLY: &str = r#"Locked in. See you Monday.

```json
{
  "action": "CREATE_PLAN",
  "workouts": [
    {
      "title": "Engine Builder",
      "format": "20-Minute AMRAP",
      "exercises": [
        {"name": "Row", "scheme": "250 m"},
        {"name": "Wall Ball", "scheme": "15 reps", "load": "20 lb"}
      ],
      "scheduled_date": "2025-09-01"
    },
    {
      "title": "Leg Day Grinder",
      "format": "3 Rounds For Time (20-minute cap)",
      "description": "Pace the lunges, sprint the row.",
      "scheduled_date": "2025-09-03"
    }
  ]
}
```"#;

#[tokio::test]
async fn test_conversation_turns_into_scheduled_runnable_workouts() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_reply(PROPOSAL_REPLY)
            .with_reply(ACCEPTED_REPLY),
    );
    let mut session = CoachSession::new(provider, settings());
    let store = MemoryStore::new();

    // Turn one: the coach proposes, nothing is stored yet
    session
        .send("Program me two crossfit workouts for next week")
        .await
        .unwrap();
    let commands = session.take_commands();
    let applied = apply_command(&store, ATHLETE, &commands[0]).await.unwrap();
    match applied {
        AppliedCommand::Proposed { workouts } => {
            assert_eq!(workouts.len(), 2);
            assert_eq!(workouts[0].title, "Engine Builder");
        }
        other => panic!("expected a proposal, got {other:?}"),
    }
    assert!(store
        .list_workouts(&WorkoutFilter::new())
        .await
        .unwrap()
        .is_empty());

    // Turn two: acceptance persists both workouts with ids and ownership
    session.send("Looks great, lock in the wod").await.unwrap();
    let commands = session.take_commands();
    let applied = apply_commands(&store, ATHLETE, &commands).await.unwrap();
    let created = match &applied[0] {
        AppliedCommand::Created { workouts } => workouts.clone(),
        other => panic!("expected created workouts, got {other:?}"),
    };
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|workout| workout.created_by == ATHLETE));
    assert!(created.iter().all(|workout| !workout.id.is_empty()));

    // The stored format lines drive real timer configurations
    let engine = &created[0];
    let engine_config = parse_format(&engine.format);
    assert_eq!(engine_config.kind, TimerKind::Countdown);
    assert_eq!(engine_config.duration_seconds, 1200);

    let grinder = &created[1];
    let grinder_config = parse_format(&grinder.format);
    assert_eq!(grinder_config.kind, TimerKind::CountUp);
    assert_eq!(grinder_config.cap_seconds, Some(1200));

    // The calendar sees what the coach scheduled
    let monday = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let on_monday = scheduling::workouts_on(&store, monday).await.unwrap();
    assert_eq!(on_monday.len(), 1);
    assert_eq!(on_monday[0].title, "Engine Builder");

    let week = scheduling::workouts_between(
        &store,
        monday,
        NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(week.len(), 2);
    assert_eq!(week[0].workouts[0].title, "Engine Builder");
    assert_eq!(week[1].workouts[0].title, "Leg Day Grinder");

    // Scores logged against the created workout feed the personal best
    let first = WorkoutScore::time(&grinder.id, ATHLETE, 1122);
    let second = WorkoutScore::time(&grinder.id, ATHLETE, 1055);
    scoreboard::submit_score(&store, &first, None).await.unwrap();
    scoreboard::submit_score(&store, &second, None)
        .await
        .unwrap();
    let best = scoreboard::personal_best(&store, &grinder.id, ATHLETE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(best.time_seconds, Some(1055));
}

#[tokio::test]
async fn test_coach_deletion_uses_ids_from_the_conversation() {
    let store = MemoryStore::new();
    let provider = Arc::new(ScriptedProvider::new().with_reply(ACCEPTED_REPLY));
    let mut session = CoachSession::new(provider, settings());

    session.send("Create my crossfit week").await.unwrap();
    let commands = session.take_commands();
    let applied = apply_commands(&store, ATHLETE, &commands).await.unwrap();
    let created = match &applied[0] {
        AppliedCommand::Created { workouts } => workouts.clone(),
        other => panic!("expected created workouts, got {other:?}"),
    };
    let doomed_id = created[0].id.clone();

    // A later turn deletes one real workout and references one stale id
    let deletion_reply = format!(
        "Done, that one is gone.\n\n```json\n{{\"action\": \"DELETE_WORKOUTS\", \"workout_ids\": [\"{doomed_id}\", \"ghost-workout\"]}}\n```"
    );
    let follow_up = Arc::new(ScriptedProvider::new().with_reply(deletion_reply));
    let mut session = CoachSession::new(follow_up, settings());
    session
        .send("Drop the first wod, travel week")
        .await
        .unwrap();

    let commands = session.take_commands();
    let applied = apply_command(&store, ATHLETE, &commands[0]).await.unwrap();
    match applied {
        AppliedCommand::Deleted { deleted, missing } => {
            assert_eq!(deleted, vec![doomed_id.clone()]);
            assert_eq!(missing, vec!["ghost-workout".to_string()]);
        }
        other => panic!("expected a deletion, got {other:?}"),
    }

    assert!(store.get_workout(&doomed_id).await.unwrap().is_none());
    assert_eq!(
        store
            .list_workouts(&WorkoutFilter::new())
            .await
            .unwrap()
            .len(),
        1
    );
}
