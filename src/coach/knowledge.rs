// ABOUTME: Training domain catalog with keyword lists and coaching knowledge blocks
// ABOUTME: Knowledge text loads at compile time from markdown files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Training Domains
//!
//! The ten disciplines the coach can specialize into for a turn. Each domain
//! carries a fixed keyword list (driving the synchronous classifier pass) and
//! a knowledge block loaded at compile time from markdown, which prompt
//! assembly splices into the system instruction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A training discipline the coach holds knowledge about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingDomain {
    /// CrossFit-style mixed-modal training
    Crossfit,
    /// Squat/bench/deadlift maximal strength
    Powerlifting,
    /// Olympic snatch and clean and jerk
    Weightlifting,
    /// Hypertrophy-focused training
    Bodybuilding,
    /// Distance running
    Running,
    /// Swim/bike/run multisport
    Triathlon,
    /// High-intensity interval training
    Hiit,
    /// Range of motion and movement preparation
    Mobility,
    /// Training-support nutrition
    Nutrition,
    /// General physical preparedness; also the classifier fallback
    Hybrid,
}

impl TrainingDomain {
    /// All domains in declaration order, which is also classifier result order
    pub const ALL: [Self; 10] = [
        Self::Crossfit,
        Self::Powerlifting,
        Self::Weightlifting,
        Self::Bodybuilding,
        Self::Running,
        Self::Triathlon,
        Self::Hiit,
        Self::Mobility,
        Self::Nutrition,
        Self::Hybrid,
    ];

    /// Stable lowercase name matching the serialized form
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Crossfit => "crossfit",
            Self::Powerlifting => "powerlifting",
            Self::Weightlifting => "weightlifting",
            Self::Bodybuilding => "bodybuilding",
            Self::Running => "running",
            Self::Triathlon => "triathlon",
            Self::Hiit => "hiit",
            Self::Mobility => "mobility",
            Self::Nutrition => "nutrition",
            Self::Hybrid => "hybrid",
        }
    }

    /// Look a domain up by name, ignoring case and surrounding whitespace
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|domain| domain.name() == normalized)
    }

    /// Keywords whose substring presence in a message selects this domain
    ///
    /// Matching is substring-based over the lowercased message, so entries
    /// stay long enough not to hide inside ordinary words.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Crossfit => &[
                "crossfit",
                "wod",
                "amrap",
                "emom",
                "metcon",
                "fran",
                "murph",
                "thruster",
                "box jump",
                "double under",
                "chipper",
            ],
            Self::Powerlifting => &[
                "powerlifting",
                "powerlifter",
                "squat",
                "deadlift",
                "bench press",
                "one rep max",
                "1rm",
                "wilks",
            ],
            Self::Weightlifting => &[
                "weightlifting",
                "snatch",
                "clean and jerk",
                "olympic lift",
                "hang clean",
                "overhead squat",
                "split jerk",
            ],
            Self::Bodybuilding => &[
                "bodybuilding",
                "hypertrophy",
                "muscle growth",
                "bicep",
                "tricep",
                "physique",
                "isolation",
                "lagging muscle",
            ],
            Self::Running => &[
                "running",
                "runner",
                "marathon",
                "5k",
                "10k",
                "tempo run",
                "long run",
                "jog",
                "mileage",
            ],
            Self::Triathlon => &[
                "triathlon",
                "triathlete",
                "ironman",
                "ftp",
                "swim",
                "cycling",
                "bike split",
                "brick workout",
            ],
            Self::Hiit => &[
                "hiit",
                "high intensity interval",
                "tabata",
                "sprint interval",
                "burpee",
            ],
            Self::Mobility => &[
                "mobility",
                "stretching",
                "flexibility",
                "foam roll",
                "yoga",
                "warm up",
                "warmup",
                "range of motion",
            ],
            Self::Nutrition => &[
                "nutrition",
                "macro",
                "protein",
                "calorie",
                "diet",
                "meal plan",
                "carb",
                "supplement",
            ],
            Self::Hybrid => &[
                "hybrid",
                "general fitness",
                "overall fitness",
                "well rounded",
                "cross training",
            ],
        }
    }

    /// Coaching knowledge block spliced into the system prompt
    #[must_use]
    pub const fn knowledge(self) -> &'static str {
        match self {
            Self::Crossfit => include_str!("knowledge/crossfit.md"),
            Self::Powerlifting => include_str!("knowledge/powerlifting.md"),
            Self::Weightlifting => include_str!("knowledge/weightlifting.md"),
            Self::Bodybuilding => include_str!("knowledge/bodybuilding.md"),
            Self::Running => include_str!("knowledge/running.md"),
            Self::Triathlon => include_str!("knowledge/triathlon.md"),
            Self::Hiit => include_str!("knowledge/hiit.md"),
            Self::Mobility => include_str!("knowledge/mobility.md"),
            Self::Nutrition => include_str!("knowledge/nutrition.md"),
            Self::Hybrid => include_str!("knowledge/hybrid.md"),
        }
    }
}

impl fmt::Display for TrainingDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for domain in TrainingDomain::ALL {
            assert_eq!(TrainingDomain::from_name(domain.name()), Some(domain));
        }
        assert_eq!(
            TrainingDomain::from_name("  CrossFit "),
            Some(TrainingDomain::Crossfit)
        );
        assert_eq!(TrainingDomain::from_name("pilates"), None);
    }

    #[test]
    fn serde_tags_match_names() {
        for domain in TrainingDomain::ALL {
            let json = serde_json::to_string(&domain).unwrap();
            assert_eq!(json, format!("\"{}\"", domain.name()));
        }
    }

    #[test]
    fn every_domain_has_keywords_and_knowledge() {
        for domain in TrainingDomain::ALL {
            assert!(!domain.keywords().is_empty(), "{domain} has no keywords");
            assert!(
                domain.knowledge().len() > 200,
                "{domain} knowledge block looks empty"
            );
        }
    }
}
