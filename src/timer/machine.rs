// ABOUTME: Tick-driven workout timer state machine with typed haptic cues
// ABOUTME: Phases run idle -> intro(3,2,1,Go) -> running <-> paused -> complete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Workout Timer State Machine
//!
//! Synchronous finite-state machine advanced by one-second [`WorkoutTimer::tick`]
//! calls, so every transition is testable without a runtime. The async driver
//! lives in [`crate::timer::runner`].
//!
//! Transitions return [`TimerCue`] events the host maps to haptics, vibration,
//! or audio; the machine itself never touches hardware.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TimerConfig, TimerKind};

/// First intro step shown when the timer starts
const INTRO_START_STEP: u8 = 3;

/// Vibration pattern for the finish alarm: alternating wait/vibrate millis
pub const FINISH_ALARM_PATTERN_MILLIS: [u64; 6] = [0, 500, 200, 500, 200, 500];

/// Phase of the workout timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Not started; clock shows the configured starting value
    Idle,
    /// Counting down 3-2-1 before the clock moves
    Intro,
    /// Clock ticking
    Running,
    /// Clock stopped with accumulated time preserved
    Paused,
    /// Finished; no further ticking
    Complete,
}

/// Typed event the host maps to a haptic, vibration, or audio signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum TimerCue {
    /// Intro beep; `step` counts down 3, 2, 1
    IntroStep {
        /// Remaining intro step being shown
        step: u8,
    },
    /// Go signal fired as the clock starts moving
    Go,
    /// Workout finished; the host plays the multi-pulse alarm
    FinishAlarm {
        /// Alternating wait/vibrate durations in milliseconds
        pattern_millis: Vec<u64>,
    },
}

/// Workout timer advanced by external one-second ticks
#[derive(Debug, Clone)]
pub struct WorkoutTimer {
    config: TimerConfig,
    phase: TimerPhase,
    intro_step: u8,
    seconds: u32,
}

impl WorkoutTimer {
    /// Create an idle timer showing the configured starting value
    #[must_use]
    pub const fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: TimerPhase::Idle,
            intro_step: INTRO_START_STEP,
            seconds: config.duration_seconds,
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Current clock value in seconds
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Remaining intro step; only meaningful while in [`TimerPhase::Intro`]
    #[must_use]
    pub const fn intro_step(&self) -> u8 {
        self.intro_step
    }

    /// Configuration the timer was built from
    #[must_use]
    pub const fn config(&self) -> TimerConfig {
        self.config
    }

    /// Begin (or resume) the workout via the 3-2-1-Go intro
    ///
    /// From `paused` the accumulated clock is preserved but the intro always
    /// replays in full; resuming re-primes the athlete the same way a fresh
    /// start does. No-op in any other phase.
    pub fn start(&mut self) -> Vec<TimerCue> {
        match self.phase {
            TimerPhase::Idle | TimerPhase::Paused => {
                self.phase = TimerPhase::Intro;
                self.intro_step = INTRO_START_STEP;
                debug!(seconds = self.seconds, "timer entering intro");
                vec![TimerCue::IntroStep {
                    step: INTRO_START_STEP,
                }]
            }
            TimerPhase::Intro | TimerPhase::Running | TimerPhase::Complete => Vec::new(),
        }
    }

    /// Advance the machine by one second
    ///
    /// Only `intro` and `running` consume ticks; every other phase ignores
    /// them, which is what guarantees a `complete` timer never moves again.
    pub fn tick(&mut self) -> Vec<TimerCue> {
        match self.phase {
            TimerPhase::Intro => self.tick_intro(),
            TimerPhase::Running => self.tick_running(),
            TimerPhase::Idle | TimerPhase::Paused | TimerPhase::Complete => Vec::new(),
        }
    }

    fn tick_intro(&mut self) -> Vec<TimerCue> {
        if self.intro_step > 1 {
            self.intro_step -= 1;
            vec![TimerCue::IntroStep {
                step: self.intro_step,
            }]
        } else {
            // The Go tick is also the transition into running
            self.phase = TimerPhase::Running;
            debug!(seconds = self.seconds, "timer running");
            vec![TimerCue::Go]
        }
    }

    fn tick_running(&mut self) -> Vec<TimerCue> {
        match self.config.kind {
            TimerKind::Countdown => {
                self.seconds = self.seconds.saturating_sub(1);
                if self.seconds == 0 {
                    return self.finish();
                }
            }
            TimerKind::CountUp => {
                self.seconds = self.seconds.saturating_add(1);
                if let Some(cap) = self.config.cap_seconds {
                    if self.seconds >= cap {
                        self.seconds = cap;
                        return self.finish();
                    }
                }
            }
        }
        Vec::new()
    }

    fn finish(&mut self) -> Vec<TimerCue> {
        self.phase = TimerPhase::Complete;
        debug!(seconds = self.seconds, "timer complete");
        vec![TimerCue::FinishAlarm {
            pattern_millis: FINISH_ALARM_PATTERN_MILLIS.to_vec(),
        }]
    }

    /// Stop ticking without touching the accumulated clock
    ///
    /// Only meaningful while `running`; the intro cannot be paused.
    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
            debug!(seconds = self.seconds, "timer paused");
        }
    }

    /// Return to `idle` with the clock reinitialized from the configuration
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
        debug!("timer reset");
    }

    /// From `complete`, reinitialize the clock and re-enter the intro
    pub fn restart(&mut self) -> Vec<TimerCue> {
        if self.phase == TimerPhase::Complete {
            *self = Self::new(self.config);
            self.start()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_intro(timer: &mut WorkoutTimer) {
        timer.start();
        // Ticks advance 3 -> 2 -> 1 -> Go
        for _ in 0..3 {
            timer.tick();
        }
    }

    #[test]
    fn intro_counts_down_then_goes() {
        let mut timer = WorkoutTimer::new(TimerConfig::countdown(600));
        assert_eq!(timer.phase(), TimerPhase::Idle);

        let cues = timer.start();
        assert_eq!(timer.phase(), TimerPhase::Intro);
        assert_eq!(cues, vec![TimerCue::IntroStep { step: 3 }]);

        assert_eq!(timer.tick(), vec![TimerCue::IntroStep { step: 2 }]);
        assert_eq!(timer.tick(), vec![TimerCue::IntroStep { step: 1 }]);

        let go = timer.tick();
        assert_eq!(go, vec![TimerCue::Go]);
        assert_eq!(timer.phase(), TimerPhase::Running);
        // The Go tick itself does not move the clock
        assert_eq!(timer.seconds(), 600);
    }

    #[test]
    fn countdown_completes_at_zero_and_stops() {
        let mut timer = WorkoutTimer::new(TimerConfig::countdown(2));
        run_intro(&mut timer);

        assert!(timer.tick().is_empty());
        assert_eq!(timer.seconds(), 1);

        let cues = timer.tick();
        assert_eq!(timer.phase(), TimerPhase::Complete);
        assert!(matches!(cues.as_slice(), [TimerCue::FinishAlarm { .. }]));

        // Complete ignores further ticks
        assert!(timer.tick().is_empty());
        assert_eq!(timer.seconds(), 0);
    }

    #[test]
    fn count_up_stops_at_cap() {
        let mut timer = WorkoutTimer::new(TimerConfig::count_up(3));
        run_intro(&mut timer);

        timer.tick();
        timer.tick();
        assert_eq!(timer.phase(), TimerPhase::Running);

        let cues = timer.tick();
        assert_eq!(timer.phase(), TimerPhase::Complete);
        assert_eq!(timer.seconds(), 3);
        assert!(matches!(cues.as_slice(), [TimerCue::FinishAlarm { .. }]));
    }

    #[test]
    fn pause_preserves_time_and_resume_replays_intro() {
        let mut timer = WorkoutTimer::new(TimerConfig::count_up(600));
        run_intro(&mut timer);

        timer.tick();
        timer.tick();
        assert_eq!(timer.seconds(), 2);

        timer.pause();
        assert_eq!(timer.phase(), TimerPhase::Paused);
        assert!(timer.tick().is_empty());
        assert_eq!(timer.seconds(), 2);

        // Resume goes back through the full 3-2-1-Go intro
        let cues = timer.start();
        assert_eq!(timer.phase(), TimerPhase::Intro);
        assert_eq!(cues, vec![TimerCue::IntroStep { step: 3 }]);
        for _ in 0..3 {
            timer.tick();
        }
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.seconds(), 2);
    }

    #[test]
    fn pause_is_ignored_during_intro() {
        let mut timer = WorkoutTimer::new(TimerConfig::countdown(60));
        timer.start();
        timer.pause();
        assert_eq!(timer.phase(), TimerPhase::Intro);
    }

    #[test]
    fn reset_returns_to_idle_from_any_phase() {
        let mut timer = WorkoutTimer::new(TimerConfig::countdown(60));
        run_intro(&mut timer);
        timer.tick();
        assert_eq!(timer.seconds(), 59);

        timer.reset();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.seconds(), 60);
    }

    #[test]
    fn restart_only_works_from_complete() {
        let mut timer = WorkoutTimer::new(TimerConfig::countdown(1));
        assert!(timer.restart().is_empty());

        run_intro(&mut timer);
        timer.tick();
        assert_eq!(timer.phase(), TimerPhase::Complete);

        let cues = timer.restart();
        assert_eq!(timer.phase(), TimerPhase::Intro);
        assert_eq!(timer.seconds(), 1);
        assert_eq!(cues, vec![TimerCue::IntroStep { step: 3 }]);
    }

    #[test]
    fn start_is_a_no_op_while_running() {
        let mut timer = WorkoutTimer::new(TimerConfig::countdown(60));
        run_intro(&mut timer);
        assert!(timer.start().is_empty());
        assert_eq!(timer.phase(), TimerPhase::Running);
    }
}
