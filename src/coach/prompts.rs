// ABOUTME: System prompts for the AI coach loaded at compile time
// ABOUTME: Assembles the per-turn instruction from the core prompt and domain knowledge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Coach Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy
//! maintenance. The per-turn system instruction is the invariant core prompt
//! followed by the knowledge blocks of whichever domains the classifier
//! matched, joined by blank lines.

use super::knowledge::TrainingDomain;

/// Core coach persona and the fenced-JSON command protocol
///
/// Always the first section of the system instruction; defines the
/// `PROPOSE_PLAN` / `CREATE_PLAN` / `DELETE_WORKOUTS` actions.
pub const COACH_SYSTEM_PROMPT: &str = include_str!("prompts/coach_system.md");

/// Instruction prompt for the domain classification request
///
/// Restricts the model's reply to a JSON array drawn from the ten valid
/// domain names.
pub const DOMAIN_CLASSIFIER_PROMPT: &str = include_str!("prompts/domain_classifier.md");

/// Assemble the full system instruction for one coach turn
#[must_use]
pub fn assemble_system_prompt(domains: &[TrainingDomain]) -> String {
    let mut sections = Vec::with_capacity(domains.len() + 1);
    sections.push(COACH_SYSTEM_PROMPT.trim());
    for domain in domains {
        sections.push(domain.knowledge().trim());
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_prompt_leads_the_assembled_instruction() {
        let prompt = assemble_system_prompt(&[TrainingDomain::Crossfit]);
        assert!(prompt.starts_with(COACH_SYSTEM_PROMPT.trim()));
        assert!(prompt.contains("CrossFit"));
    }

    #[test]
    fn domains_join_with_blank_lines_in_order() {
        let prompt =
            assemble_system_prompt(&[TrainingDomain::Running, TrainingDomain::Nutrition]);
        let running_pos = prompt.find("Running Coaching Knowledge").unwrap();
        let nutrition_pos = prompt.find("Nutrition Coaching Knowledge").unwrap();
        assert!(running_pos < nutrition_pos);
    }

    #[test]
    fn no_domains_still_yields_the_core_prompt() {
        let prompt = assemble_system_prompt(&[]);
        assert_eq!(prompt, COACH_SYSTEM_PROMPT.trim());
    }
}
