// ABOUTME: Intent classifier mapping user messages to training domains
// ABOUTME: Keyword pass first, optional LLM fallback, hybrid when nothing matches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Intent Classification
//!
//! Decides which training domains a user message touches so prompt assembly
//! can splice in the right knowledge. The synchronous keyword pass always
//! runs first and costs no network call; the LLM fallback fires only when no
//! keyword matched and a provider is available. Classification never errors:
//! every failure path degrades to `[hybrid]`.

use std::time::Duration;

use tracing::{debug, warn};

use super::knowledge::TrainingDomain;
use super::prompts::DOMAIN_CLASSIFIER_PROMPT;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Synchronous keyword pass over the lowercased message
///
/// Domains are selected by substring membership against their fixed keyword
/// lists and returned in declaration order, each at most once. An empty
/// result means no keyword matched, not `[hybrid]`; the fallback is applied
/// by [`classify`].
#[must_use]
pub fn classify_keywords(message: &str) -> Vec<TrainingDomain> {
    let lowered = message.to_lowercase();
    TrainingDomain::ALL
        .into_iter()
        .filter(|domain| {
            domain
                .keywords()
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .collect()
}

/// Classify a message into at least one training domain
///
/// Keyword pass first; if it matches nothing and a provider is present, one
/// classification request goes out with `timeout` as its deadline. Request
/// failure, timeout, unparseable output, and provider absence all degrade to
/// `[hybrid]`.
pub async fn classify(
    message: &str,
    provider: Option<&dyn LlmProvider>,
    timeout: Duration,
) -> Vec<TrainingDomain> {
    let matched = classify_keywords(message);
    if !matched.is_empty() {
        debug!(domains = ?matched, "keyword pass matched");
        return matched;
    }

    match provider {
        Some(provider) => classify_with_llm(message, provider, timeout).await,
        None => vec![TrainingDomain::Hybrid],
    }
}

/// One classification request against the provider; any failure means hybrid
async fn classify_with_llm(
    message: &str,
    provider: &dyn LlmProvider,
    timeout: Duration,
) -> Vec<TrainingDomain> {
    let request = ChatRequest::new(vec![
        ChatMessage::system(DOMAIN_CLASSIFIER_PROMPT),
        ChatMessage::user(message),
    ])
    .with_temperature(0.0);

    match tokio::time::timeout(timeout, provider.complete(&request)).await {
        Ok(Ok(response)) => {
            let domains = parse_domain_list(&response.content);
            debug!(domains = ?domains, "llm classification");
            domains
        }
        Ok(Err(error)) => {
            warn!(error = %error, "classification request failed, falling back to hybrid");
            vec![TrainingDomain::Hybrid]
        }
        Err(_) => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "classification request timed out, falling back to hybrid"
            );
            vec![TrainingDomain::Hybrid]
        }
    }
}

/// Parse the model's reply into valid domains, hybrid if nothing survives
///
/// Tolerates prose or fences around the array by slicing from the first `[`
/// to the last `]`. Unknown names are discarded; duplicates keep their first
/// position.
fn parse_domain_list(reply: &str) -> Vec<TrainingDomain> {
    let candidate = match (reply.find('['), reply.rfind(']')) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => return vec![TrainingDomain::Hybrid],
    };

    let Ok(names) = serde_json::from_str::<Vec<String>>(candidate) else {
        return vec![TrainingDomain::Hybrid];
    };

    let mut domains = Vec::new();
    for name in names {
        if let Some(domain) = TrainingDomain::from_name(&name) {
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
    }

    if domains.is_empty() {
        vec![TrainingDomain::Hybrid]
    } else {
        domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_names_map_to_crossfit() {
        let domains = classify_keywords("What's a good Fran strategy?");
        assert!(domains.contains(&TrainingDomain::Crossfit));
    }

    #[test]
    fn ftp_maps_to_triathlon() {
        let domains = classify_keywords("How should I retest my FTP?");
        assert!(domains.contains(&TrainingDomain::Triathlon));
    }

    #[test]
    fn multiple_domains_come_back_in_declaration_order() {
        let domains = classify_keywords("Deadlift day then a tempo run, what should I eat?");
        assert_eq!(
            domains,
            vec![
                TrainingDomain::Powerlifting,
                TrainingDomain::Running,
                TrainingDomain::Nutrition,
            ]
        );
    }

    #[test]
    fn domains_appear_at_most_once() {
        let domains = classify_keywords("squat, deadlift, bench press, 1rm");
        assert_eq!(domains, vec![TrainingDomain::Powerlifting]);
    }

    #[test]
    fn no_keywords_means_empty_keyword_pass() {
        assert!(classify_keywords("hello there").is_empty());
    }

    #[tokio::test]
    async fn no_match_and_no_provider_falls_back_to_hybrid() {
        let domains = classify("hello there", None, Duration::from_secs(1)).await;
        assert_eq!(domains, vec![TrainingDomain::Hybrid]);
    }

    #[test]
    fn domain_list_parsing_tolerates_prose_and_fences() {
        assert_eq!(
            parse_domain_list("```json\n[\"crossfit\", \"nutrition\"]\n```"),
            vec![TrainingDomain::Crossfit, TrainingDomain::Nutrition]
        );
        assert_eq!(
            parse_domain_list("Sure! [\"running\"] covers it."),
            vec![TrainingDomain::Running]
        );
    }

    #[test]
    fn domain_list_parsing_discards_invalid_names() {
        assert_eq!(
            parse_domain_list("[\"running\", \"zumba\", \"running\"]"),
            vec![TrainingDomain::Running]
        );
        assert_eq!(
            parse_domain_list("[\"zumba\"]"),
            vec![TrainingDomain::Hybrid]
        );
        assert_eq!(parse_domain_list("not json"), vec![TrainingDomain::Hybrid]);
        assert_eq!(parse_domain_list("[]"), vec![TrainingDomain::Hybrid]);
    }
}
