// ABOUTME: Score submission, history, and personal-best lookups
// ABOUTME: Optionally announces a submitted score to a squad's activity feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::{FeedEntry, FeedKind, WorkoutScore};
use crate::scoring::{best_score, format_score};
use crate::store::WorkoutStore;

/// Submit a score, optionally announcing it to a squad feed
///
/// Business rules:
/// - The score must reference a stored workout
/// - When `announce_to` names a squad, the squad must exist and the scoring
///   athlete must be a member; the announcement carries the formatted score
///   and links back to both the workout and the score
/// - Scaled scores are announced with a `(scaled)` note
///
/// # Errors
///
/// Returns `ResourceNotFound` when the workout or squad does not exist and
/// `InvalidInput` when announcing to a squad the athlete is not part of.
pub async fn submit_score(
    store: &dyn WorkoutStore,
    score: &WorkoutScore,
    announce_to: Option<&str>,
) -> AppResult<String> {
    let workout = store
        .get_workout(&score.workout_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("workout {}", score.workout_id)))?;

    let score_id = store.create_score(score).await?;
    info!(
        workout_id = %score.workout_id,
        user_id = %score.user_id,
        "score submitted"
    );

    if let Some(squad_id) = announce_to {
        let squad = store
            .get_squad(squad_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("squad {squad_id}")))?;
        if !squad.has_member(&score.user_id) {
            return Err(AppError::invalid_input(format!(
                "user {} is not a member of squad {squad_id}",
                score.user_id
            )));
        }

        let rx_note = if score.rx { "" } else { " (scaled)" };
        let message = format!(
            "Logged {}{rx_note} on {}",
            format_score(score),
            workout.title
        );
        let entry = FeedEntry::new(&score.user_id, FeedKind::ScorePosted, message)
            .in_squad(squad_id)
            .about_workout(&score.workout_id)
            .about_score(&score_id);
        store.create_feed_entry(&entry).await?;
    }

    Ok(score_id)
}

/// A user's score history for a workout, most recent first
///
/// # Errors
///
/// Returns store errors on listing failure.
pub async fn score_history(
    store: &dyn WorkoutStore,
    workout_id: &str,
    user_id: Option<&str>,
) -> AppResult<Vec<WorkoutScore>> {
    store.list_scores(workout_id, user_id).await
}

/// A user's best score on a workout, if they have logged any
///
/// Ranking follows [`best_score`]: faster times and higher round counts win,
/// completion-only scores rank below measured ones.
///
/// # Errors
///
/// Returns store errors on listing failure.
pub async fn personal_best(
    store: &dyn WorkoutStore,
    workout_id: &str,
    user_id: &str,
) -> AppResult<Option<WorkoutScore>> {
    let scores = store.list_scores(workout_id, Some(user_id)).await?;
    Ok(best_score(&scores).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::models::{Squad, Workout};
    use crate::store::MemoryStore;

    async fn store_with_workout() -> (MemoryStore, Workout) {
        let store = MemoryStore::new();
        let workout = Workout::new("Helen", "3 Rounds For Time (15-minute cap)", "coach");
        store.create_workout(&workout).await.unwrap();
        (store, workout)
    }

    #[tokio::test]
    async fn submission_requires_a_stored_workout() {
        let store = MemoryStore::new();
        let score = WorkoutScore::time("ghost", "user-1", 540);
        let error = submit_score(&store, &score, None).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn announcement_posts_to_the_squad_feed() {
        let (store, workout) = store_with_workout().await;
        let squad = Squad::new("Morning Crew", "user-1");
        store.create_squad(&squad).await.unwrap();

        let score = WorkoutScore::time(&workout.id, "user-1", 540);
        let score_id = submit_score(&store, &score, Some(&squad.id)).await.unwrap();

        let feed = store.list_feed(Some(&squad.id), 10).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, FeedKind::ScorePosted);
        assert_eq!(feed[0].message, "Logged 9:00 on Helen");
        assert_eq!(feed[0].score_id.as_deref(), Some(score_id.as_str()));
        assert_eq!(feed[0].workout_id.as_deref(), Some(workout.id.as_str()));
    }

    #[tokio::test]
    async fn scaled_scores_are_announced_as_scaled() {
        let (store, workout) = store_with_workout().await;
        let squad = Squad::new("Morning Crew", "user-1");
        store.create_squad(&squad).await.unwrap();

        let score = WorkoutScore::rounds_reps(&workout.id, "user-1", 12, 7).scaled();
        submit_score(&store, &score, Some(&squad.id)).await.unwrap();

        let feed = store.list_feed(Some(&squad.id), 10).await.unwrap();
        assert_eq!(feed[0].message, "Logged 12 rounds + 7 reps (scaled) on Helen");
    }

    #[tokio::test]
    async fn non_members_cannot_announce() {
        let (store, workout) = store_with_workout().await;
        let squad = Squad::new("Morning Crew", "someone-else");
        store.create_squad(&squad).await.unwrap();

        let score = WorkoutScore::time(&workout.id, "user-1", 540);
        let error = submit_score(&store, &score, Some(&squad.id)).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);

        // The score itself still landed; only the announcement was refused
        let history = score_history(&store, &workout.id, Some("user-1")).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn personal_best_prefers_the_faster_time() {
        let (store, workout) = store_with_workout().await;
        submit_score(&store, &WorkoutScore::time(&workout.id, "user-1", 600), None)
            .await
            .unwrap();
        submit_score(&store, &WorkoutScore::time(&workout.id, "user-1", 540), None)
            .await
            .unwrap();
        submit_score(&store, &WorkoutScore::time(&workout.id, "rival", 500), None)
            .await
            .unwrap();

        let best = personal_best(&store, &workout.id, "user-1").await.unwrap().unwrap();
        assert_eq!(best.time_seconds, Some(540));
        assert_eq!(best.user_id, "user-1");
    }
}
