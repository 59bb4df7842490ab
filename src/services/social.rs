// ABOUTME: Squad membership, event planning, RSVPs, and activity-feed access
// ABOUTME: Event creation announces to the squad feed; RSVPs require membership
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::{FeedEntry, FeedKind, Squad, SquadEvent};
use crate::store::WorkoutStore;

/// Create a squad founded by `founder_id`
///
/// The founder becomes the squad's first member.
///
/// # Errors
///
/// Returns store errors on creation failure.
pub async fn create_squad(
    store: &dyn WorkoutStore,
    name: &str,
    founder_id: &str,
    description: Option<&str>,
) -> AppResult<Squad> {
    let mut squad = Squad::new(name, founder_id);
    if let Some(description) = description {
        squad = squad.with_description(description);
    }
    store.create_squad(&squad).await?;
    info!(squad_id = %squad.id, "squad created");
    Ok(squad)
}

/// Join a squad
///
/// Joining a squad the user already belongs to is a no-op.
///
/// # Errors
///
/// Returns `ResourceNotFound` when the squad does not exist.
pub async fn join_squad(
    store: &dyn WorkoutStore,
    squad_id: &str,
    user_id: &str,
) -> AppResult<Squad> {
    store.add_squad_member(squad_id, user_id).await
}

/// Create a squad event and announce it on the squad feed
///
/// Business rules:
/// - Only squad members can create events
/// - The creator is the event's first attendee
/// - The announcement names the event and its start date
///
/// # Errors
///
/// Returns `ResourceNotFound` when the squad does not exist and
/// `InvalidInput` when the creator is not a member.
pub async fn create_event(
    store: &dyn WorkoutStore,
    squad_id: &str,
    title: &str,
    starts_at: DateTime<Utc>,
    location: Option<&str>,
    created_by: &str,
) -> AppResult<SquadEvent> {
    let squad = store
        .get_squad(squad_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("squad {squad_id}")))?;
    if !squad.has_member(created_by) {
        return Err(AppError::invalid_input(format!(
            "user {created_by} is not a member of squad {squad_id}"
        )));
    }

    let mut event = SquadEvent::new(squad_id, title, starts_at);
    if let Some(location) = location {
        event = event.with_location(location);
    }
    event.attendee_ids.push(created_by.to_string());
    store.create_event(&event).await?;

    let message = format!("New event \"{title}\" on {}", starts_at.format("%Y-%m-%d"));
    let entry = FeedEntry::new(created_by, FeedKind::EventCreated, message).in_squad(squad_id);
    store.create_feed_entry(&entry).await?;

    info!(event_id = %event.id, squad_id = %squad_id, "event created");
    Ok(event)
}

/// Upcoming events for a squad, soonest first
///
/// # Errors
///
/// Returns store errors on listing failure.
pub async fn upcoming_events(
    store: &dyn WorkoutStore,
    squad_id: &str,
) -> AppResult<Vec<SquadEvent>> {
    store.list_events(squad_id, Some(Utc::now())).await
}

/// RSVP to an event
///
/// Business rules:
/// - Only members of the hosting squad can attend
/// - Repeat RSVPs are a no-op
///
/// # Errors
///
/// Returns `ResourceNotFound` when the event or its squad does not exist
/// and `InvalidInput` when the user is not a squad member.
pub async fn rsvp(
    store: &dyn WorkoutStore,
    event_id: &str,
    user_id: &str,
) -> AppResult<SquadEvent> {
    let event = store
        .get_event(event_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("event {event_id}")))?;
    let squad = store
        .get_squad(&event.squad_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("squad {}", event.squad_id)))?;
    if !squad.has_member(user_id) {
        return Err(AppError::invalid_input(format!(
            "user {user_id} is not a member of squad {}",
            event.squad_id
        )));
    }

    store.add_event_attendee(event_id, user_id).await
}

/// Post a plain announcement to a squad feed
///
/// # Errors
///
/// Returns `ResourceNotFound` when the squad does not exist and
/// `InvalidInput` when the poster is not a member.
pub async fn post_announcement(
    store: &dyn WorkoutStore,
    squad_id: &str,
    user_id: &str,
    message: &str,
) -> AppResult<FeedEntry> {
    let squad = store
        .get_squad(squad_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("squad {squad_id}")))?;
    if !squad.has_member(user_id) {
        return Err(AppError::invalid_input(format!(
            "user {user_id} is not a member of squad {squad_id}"
        )));
    }

    let entry = FeedEntry::new(user_id, FeedKind::Announcement, message).in_squad(squad_id);
    store.create_feed_entry(&entry).await?;
    Ok(entry)
}

/// Read a squad's activity feed, newest first
///
/// # Errors
///
/// Returns `ResourceNotFound` when the squad does not exist.
pub async fn squad_feed(
    store: &dyn WorkoutStore,
    squad_id: &str,
    limit: usize,
) -> AppResult<Vec<FeedEntry>> {
    if store.get_squad(squad_id).await?.is_none() {
        return Err(AppError::not_found(format!("squad {squad_id}")));
    }
    store.list_feed(Some(squad_id), limit).await
}
