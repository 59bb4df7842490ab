// ABOUTME: Async driver ticking the workout timer once per second from a tokio task
// ABOUTME: Commands arrive over a channel; state snapshots stream back to the owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Timer Runner
//!
//! Owns the single recurring callback in the crate: one tokio task with one
//! one-second interval driving a [`WorkoutTimer`]. The owning side holds a
//! [`TimerHandle`]; dropping it closes both channels and tears the task down,
//! so no tick fires after the owner is gone.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::machine::{TimerCue, TimerPhase, WorkoutTimer};
use super::TimerConfig;
use crate::errors::{AppError, AppResult};

/// Snapshot of timer state sent after every transition
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimerUpdate {
    /// Phase after the transition
    pub phase: TimerPhase,
    /// Clock value in seconds after the transition
    pub seconds: u32,
    /// Cues fired by the transition, in order
    pub cues: Vec<TimerCue>,
}

enum TimerCommand {
    Start,
    Pause,
    Reset,
    Restart,
    Stop,
}

/// Handle to a spawned timer task
///
/// Commands are fire-and-forget from the machine's point of view; state
/// comes back through [`TimerHandle::next_update`].
pub struct TimerHandle {
    commands: mpsc::Sender<TimerCommand>,
    updates: mpsc::Receiver<TimerUpdate>,
}

impl TimerHandle {
    /// Spawn a timer task for the given configuration
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(config: TimerConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(8);
        let (update_tx, update_rx) = mpsc::channel(32);

        tokio::spawn(run_timer(config, command_rx, update_tx));

        Self {
            commands: command_tx,
            updates: update_rx,
        }
    }

    /// Start the workout (or resume from pause) via the 3-2-1-Go intro
    ///
    /// # Errors
    ///
    /// Returns an error if the timer task has shut down.
    pub async fn start(&self) -> AppResult<()> {
        self.send(TimerCommand::Start).await
    }

    /// Pause the clock, preserving accumulated time
    ///
    /// # Errors
    ///
    /// Returns an error if the timer task has shut down.
    pub async fn pause(&self) -> AppResult<()> {
        self.send(TimerCommand::Pause).await
    }

    /// Return the timer to idle with the clock reinitialized
    ///
    /// # Errors
    ///
    /// Returns an error if the timer task has shut down.
    pub async fn reset(&self) -> AppResult<()> {
        self.send(TimerCommand::Reset).await
    }

    /// From complete, reinitialize and re-enter the intro
    ///
    /// # Errors
    ///
    /// Returns an error if the timer task has shut down.
    pub async fn restart(&self) -> AppResult<()> {
        self.send(TimerCommand::Restart).await
    }

    /// Stop the timer task; the update stream ends afterwards
    ///
    /// # Errors
    ///
    /// Returns an error if the timer task has already shut down.
    pub async fn stop(&self) -> AppResult<()> {
        self.send(TimerCommand::Stop).await
    }

    /// Receive the next state snapshot; `None` once the task has stopped
    pub async fn next_update(&mut self) -> Option<TimerUpdate> {
        self.updates.recv().await
    }

    async fn send(&self, command: TimerCommand) -> AppResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::internal("workout timer task has shut down"))
    }
}

async fn run_timer(
    config: TimerConfig,
    mut commands: mpsc::Receiver<TimerCommand>,
    updates: mpsc::Sender<TimerUpdate>,
) {
    let mut timer = WorkoutTimer::new(config);
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // Late ticks are dropped rather than replayed in a burst
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let before = (timer.phase(), timer.seconds());
                let cues = timer.tick();
                if (timer.phase(), timer.seconds()) == before && cues.is_empty() {
                    continue;
                }
                if send_update(&updates, &timer, cues).await.is_err() {
                    break;
                }
            }
            command = commands.recv() => {
                let cues = match command {
                    Some(TimerCommand::Start) => {
                        // Arm a fresh full second before the first intro advance
                        interval.reset();
                        timer.start()
                    }
                    Some(TimerCommand::Pause) => {
                        timer.pause();
                        Vec::new()
                    }
                    Some(TimerCommand::Reset) => {
                        timer.reset();
                        Vec::new()
                    }
                    Some(TimerCommand::Restart) => {
                        interval.reset();
                        timer.restart()
                    }
                    Some(TimerCommand::Stop) | None => break,
                };
                if send_update(&updates, &timer, cues).await.is_err() {
                    break;
                }
            }
        }
    }

    debug!("timer task stopped");
}

async fn send_update(
    updates: &mpsc::Sender<TimerUpdate>,
    timer: &WorkoutTimer,
    cues: Vec<TimerCue>,
) -> Result<(), mpsc::error::SendError<TimerUpdate>> {
    updates
        .send(TimerUpdate {
            phase: timer.phase(),
            seconds: timer.seconds(),
            cues,
        })
        .await
}
