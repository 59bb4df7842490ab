// ABOUTME: Domain service layer for business logic above the workout store
// ABOUTME: Host-agnostic services reusable from the CLI, tests, or an app backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! Domain service layer
//!
//! Free async functions over `&dyn WorkoutStore` holding the business rules
//! a host application needs around the raw record store. Services never
//! touch the network and never format for a particular UI, so they are
//! reusable from any entry point.

/// Calendar operations: day and range queries, scheduling a workout
pub mod scheduling;

/// Score submission with optional squad announcements, history, personal bests
pub mod scoreboard;

/// Squads, events, RSVPs, and the activity feed
pub mod social;
