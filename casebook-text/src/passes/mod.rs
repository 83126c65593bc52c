//! Compiled rule passes
//!
//! Each pass owns the compiled regexes of one rule table and rewrites a string in
//! table order, registering tooltip HTML in the job's [`TooltipRegistry`]. Rules are
//! compiled one regex per rule rather than merged into a single alternation: tooltip
//! and tooltip-free rules take different replacement branches.
//!
//! [`TooltipRegistry`]: crate::registry::TooltipRegistry

pub mod brace;
pub mod bracket;
pub mod mechanics;

pub use brace::BracePass;
pub use bracket::BracketPass;
pub use mechanics::MechanicsPass;

use crate::error::{RuleError, RuleTable};
use regex::Regex;

/// Build the case-insensitive regex for a delimited token.
///
/// `$1` of the result is always the text between the delimiters, so the rule's own
/// groups start at `$2`.
pub(crate) fn delimited_regex(
    table: RuleTable,
    index: usize,
    open: char,
    close: char,
    pattern: &str,
    trailing: Option<&str>,
) -> Result<Regex, RuleError> {
    let trailing = trailing
        .filter(|trailing| !trailing.is_empty())
        .map(|trailing| format!("(?:{trailing})"))
        .unwrap_or_default();
    let source = format!(
        "(?i){}({pattern}){}{trailing}",
        regex::escape(&open.to_string()),
        regex::escape(&close.to_string()),
    );
    Regex::new(&source).map_err(|err| RuleError::InvalidPattern {
        table,
        index,
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}
