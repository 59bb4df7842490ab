// ABOUTME: Structured command extraction from coach replies
// ABOUTME: Scans fenced JSON blocks, validates them, and cleans the display text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox

//! # Coach Command Extraction
//!
//! The conversational model embeds structured commands in its replies as
//! fenced JSON blocks. This module runs a three-stage pipeline over a reply:
//! find candidate blocks, parse each one, keep the valid commands. Blocks
//! that fail to parse are dropped from the command list but kept as
//! diagnostics so callers can surface or log them. All candidate blocks are
//! stripped from the display text regardless of validity.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Action name for a workout plan preview that is not persisted
pub const ACTION_PROPOSE_PLAN: &str = "PROPOSE_PLAN";

/// Action name for persisting an accepted workout plan
pub const ACTION_CREATE_PLAN: &str = "CREATE_PLAN";

/// Action name for removing workouts by id
pub const ACTION_DELETE_WORKOUTS: &str = "DELETE_WORKOUTS";

/// Shown in place of a reply that contained nothing but command blocks
pub const COMMAND_ONLY_PLACEHOLDER: &str = "Here is the plan I put together for you.";

// Matches: ```json\n{...}\n``` and bare ```\n{...}\n``` fences.
// Group 1 is the info tag, group 2 the body; (?s) lets the body span lines.
static FENCED_BLOCK_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```([A-Za-z0-9_+-]*)[^\S\n]*\n?(.*?)```").ok());

// Matches: runs of three or more newlines left behind by stripped blocks
static BLANK_RUN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\n{3,}").ok());

/// One structured command lifted out of a coach reply
///
/// The `action` field is separated out; everything else the block carried
/// rides along in `payload` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachCommand {
    /// Command verb, e.g. `CREATE_PLAN`
    pub action: String,
    /// Remaining fields of the block, keyed as the model wrote them
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl CoachCommand {
    /// Whether this command's action matches `action`, ignoring case
    #[must_use]
    pub fn is_action(&self, action: &str) -> bool {
        self.action.eq_ignore_ascii_case(action)
    }
}

/// A candidate block that failed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDiagnostic {
    /// Leading characters of the offending block
    pub snippet: String,
    /// Why the block was rejected
    pub reason: String,
}

impl BlockDiagnostic {
    fn new(body: &str, reason: String) -> Self {
        Self {
            snippet: body.trim().chars().take(80).collect(),
            reason,
        }
    }
}

/// Result of scanning one coach reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandExtraction {
    /// Valid commands in the order they appeared
    pub commands: Vec<CoachCommand>,
    /// Reply text with all candidate blocks removed
    pub display_text: String,
    /// Candidate blocks that were rejected, with reasons
    pub diagnostics: Vec<BlockDiagnostic>,
}

/// Extract structured commands from a coach reply
///
/// Candidate blocks are fences tagged `json` or whose body opens with `{`
/// or `[`; other fences (code samples in another language, plain text) are
/// left in the display text. A candidate parses into a command when it is a
/// JSON object carrying a string `action`, or the older
/// `plan_ready` + `workouts` shape, which normalizes to `CREATE_PLAN`.
/// When stripping the candidates leaves no visible text but commands were
/// found, [`COMMAND_ONLY_PLACEHOLDER`] is substituted.
#[must_use]
pub fn extract_commands(text: &str) -> CommandExtraction {
    let Some(pattern) = FENCED_BLOCK_PATTERN.as_ref() else {
        return CommandExtraction {
            commands: Vec::new(),
            display_text: text.trim().to_string(),
            diagnostics: Vec::new(),
        };
    };

    let mut commands = Vec::new();
    let mut diagnostics = Vec::new();
    let mut candidate_ranges: Vec<std::ops::Range<usize>> = Vec::new();

    for captures in pattern.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let tag = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str());
        if !is_command_candidate(tag, body) {
            continue;
        }
        candidate_ranges.push(whole.range());
        match parse_block(body) {
            Ok(command) => commands.push(command),
            Err(reason) => {
                debug!(reason = %reason, "dropping unparseable command block");
                diagnostics.push(BlockDiagnostic::new(body, reason));
            }
        }
    }

    let display_text = strip_ranges(text, &candidate_ranges);
    let display_text = if display_text.is_empty() && !commands.is_empty() {
        COMMAND_ONLY_PLACEHOLDER.to_string()
    } else {
        display_text
    };

    CommandExtraction {
        commands,
        display_text,
        diagnostics,
    }
}

/// A fence is a candidate when tagged `json` or when its body looks like JSON
fn is_command_candidate(tag: &str, body: &str) -> bool {
    if tag.eq_ignore_ascii_case("json") {
        return true;
    }
    let trimmed = body.trim_start();
    tag.is_empty() && (trimmed.starts_with('{') || trimmed.starts_with('['))
}

/// Parse one candidate body into a command or a rejection reason
fn parse_block(body: &str) -> Result<CoachCommand, String> {
    let value: Value =
        serde_json::from_str(body.trim()).map_err(|error| format!("invalid JSON: {error}"))?;
    let Value::Object(mut fields) = value else {
        return Err("command block must be a JSON object".to_string());
    };

    if let Some(action_value) = fields.remove("action") {
        let Value::String(action) = action_value else {
            return Err("\"action\" must be a string".to_string());
        };
        return Ok(CoachCommand {
            action,
            payload: fields,
        });
    }

    // Older replies signal a finished plan without an action verb
    if matches!(fields.get("plan_ready"), Some(Value::Bool(true))) && fields.contains_key("workouts")
    {
        fields.remove("plan_ready");
        return Ok(CoachCommand {
            action: ACTION_CREATE_PLAN.to_string(),
            payload: fields,
        });
    }

    Err("missing \"action\" field".to_string())
}

/// Remove the given byte ranges and tidy the leftover whitespace
fn strip_ranges(text: &str, ranges: &[std::ops::Range<usize>]) -> String {
    let mut remaining = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        remaining.push_str(&text[cursor..range.start]);
        cursor = range.end;
    }
    remaining.push_str(&text[cursor..]);

    let collapsed = BLANK_RUN_PATTERN
        .as_ref()
        .map_or_else(|| remaining.clone(), |p| p.replace_all(&remaining, "\n\n").into_owned());
    collapsed.trim().to_string()
}
