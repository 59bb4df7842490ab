// ABOUTME: Integration tests for the workout store behind its trait object
// ABOUTME: Covers patch semantics, filter composition, score history, and feed scoping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Duration, NaiveDate, Utc};

use chalkbox::errors::ErrorCode;
use chalkbox::models::{FeedEntry, FeedKind, SquadEvent, Workout, WorkoutScore};
use chalkbox::store::{MemoryStore, WorkoutFilter, WorkoutPatch, WorkoutStore};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
}

#[tokio::test]
async fn test_patch_updates_only_the_named_fields() {
    let store = MemoryStore::new();
    let workout = Workout::new("Fran", "For Time (10-minute cap)", "coach-1")
        .with_description("21-15-9 thrusters and pull-ups");
    store.create_workout(&workout).await.unwrap();

    let patch = WorkoutPatch::new().title("Fran (Rx)").schedule_on(date(4));
    let updated = store.update_workout(&workout.id, &patch).await.unwrap();

    assert_eq!(updated.title, "Fran (Rx)");
    assert_eq!(updated.scheduled_date, Some(date(4)));
    // Everything the patch did not name is untouched
    assert_eq!(updated.format, workout.format);
    assert_eq!(updated.description, workout.description);
    assert_eq!(updated.created_by, workout.created_by);

    let fetched = store.get_workout(&workout.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_mutating_missing_workouts_is_not_found() {
    let store = MemoryStore::new();

    let error = store
        .update_workout("no-such-id", &WorkoutPatch::new().title("x"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let error = store.delete_workout("no-such-id").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    // Reads stay quiet about missing records
    assert!(store.get_workout("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn test_filters_narrow_by_date_range_squad_and_creator() {
    let store = MemoryStore::new();
    let monday = Workout::new("Engine", "20-Minute AMRAP", "coach-1")
        .scheduled_on(date(4))
        .for_squad("squad-a");
    let wednesday = Workout::new("Grinder", "For Time (30-minute cap)", "coach-1")
        .scheduled_on(date(6))
        .for_squad("squad-a");
    let friday = Workout::new("Sprint", "Intervals (4 min on / 2 min off)", "coach-2")
        .scheduled_on(date(8))
        .for_squad("squad-b");
    let unscheduled = Workout::new("Backlog", "EMOM 10", "coach-1");
    for workout in [&monday, &wednesday, &friday, &unscheduled] {
        store.create_workout(workout).await.unwrap();
    }

    let early_week = store
        .list_workouts(
            &WorkoutFilter::new()
                .scheduled_between(date(4), date(7))
                .in_squad("squad-a"),
        )
        .await
        .unwrap();
    assert_eq!(early_week.len(), 2);
    assert!(early_week.iter().all(|w| w.squad_id.as_deref() == Some("squad-a")));

    let by_creator = store
        .list_workouts(&WorkoutFilter::new().created_by("coach-2"))
        .await
        .unwrap();
    assert_eq!(by_creator.len(), 1);
    assert_eq!(by_creator[0].title, "Sprint");

    // A date filter never matches unscheduled workouts
    let on_day = store
        .list_workouts(&WorkoutFilter::new().scheduled_on(date(20)))
        .await
        .unwrap();
    assert!(on_day.is_empty());

    let everything = store.list_workouts(&WorkoutFilter::new()).await.unwrap();
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
async fn test_scores_accumulate_as_history_newest_first() {
    let store = MemoryStore::new();
    let workout = Workout::new("Cindy", "20-Minute AMRAP", "coach-1");
    store.create_workout(&workout).await.unwrap();

    let mut first = WorkoutScore::rounds_reps(&workout.id, "athlete-1", 17, 4);
    first.completed_at = Utc::now() - Duration::days(14);
    let mut second = WorkoutScore::rounds_reps(&workout.id, "athlete-1", 18, 0);
    second.completed_at = Utc::now() - Duration::days(7);
    let third = WorkoutScore::rounds_reps(&workout.id, "athlete-1", 19, 11);
    let rival = WorkoutScore::rounds_reps(&workout.id, "athlete-2", 21, 0);

    for score in [&first, &second, &third, &rival] {
        store.create_score(score).await.unwrap();
    }

    let history = store
        .list_scores(&workout.id, Some("athlete-1"))
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].id, third.id);
    assert_eq!(history[1].id, second.id);
    assert_eq!(history[2].id, first.id);

    let everyone = store.list_scores(&workout.id, None).await.unwrap();
    assert_eq!(everyone.len(), 4);

    let athlete_wide = store.list_user_scores("athlete-2").await.unwrap();
    assert_eq!(athlete_wide.len(), 1);
    assert_eq!(athlete_wide[0].id, rival.id);
}

#[tokio::test]
async fn test_event_attendees_deduplicate() {
    let store = MemoryStore::new();
    let event = SquadEvent::new("squad-a", "Saturday Throwdown", Utc::now());
    store.create_event(&event).await.unwrap();

    store
        .add_event_attendee(&event.id, "athlete-1")
        .await
        .unwrap();
    let after_repeat = store
        .add_event_attendee(&event.id, "athlete-1")
        .await
        .unwrap();
    assert_eq!(after_repeat.attendee_ids, vec!["athlete-1".to_string()]);

    let error = store
        .add_event_attendee("no-such-event", "athlete-1")
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_feed_scopes_by_squad_and_caps_results() {
    let store = MemoryStore::new();
    let base = Utc::now();
    let mut entries = vec![
        FeedEntry::new("athlete-1", FeedKind::Announcement, "open gym at noon").in_squad("squad-a"),
        FeedEntry::new("athlete-2", FeedKind::ScorePosted, "Logged 3:45 on Fran").in_squad("squad-a"),
        FeedEntry::new("athlete-3", FeedKind::Announcement, "new bikes arrived").in_squad("squad-b"),
        FeedEntry::new("athlete-1", FeedKind::Announcement, "gym closed Sunday"),
    ];
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.created_at = base - Duration::minutes(i64::try_from(index).unwrap());
        store.create_feed_entry(entry).await.unwrap();
    }

    let squad_a = store.list_feed(Some("squad-a"), 10).await.unwrap();
    assert_eq!(squad_a.len(), 2);
    assert_eq!(squad_a[0].message, "open gym at noon");
    assert_eq!(squad_a[1].message, "Logged 3:45 on Fran");

    let capped = store.list_feed(Some("squad-a"), 1).await.unwrap();
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].message, "open gym at noon");

    // The global view spans squad and squadless entries alike
    let whole_gym = store.list_feed(None, 10).await.unwrap();
    assert_eq!(whole_gym.len(), 4);
    assert_eq!(whole_gym[0].message, "open gym at noon");
    assert_eq!(whole_gym[3].message, "gym closed Sunday");
}
