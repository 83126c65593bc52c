//! `{highlight}` pass
//!
//! Brace tokens are short rules-text abbreviations. They are wrapped in a plain tag and
//! the braces never reach the output. A catch-all rule is appended after the configured
//! table so that no raw `{...}` token is left for the reader.

use super::delimited_regex;
use crate::error::{RuleError, RuleTable};
use crate::registry::TooltipRegistry;
use crate::rules::HighlightRule;
use crate::template::{expand, strip_braces};
use regex::{Captures, Regex};

/// Pattern of the catch-all rule closing every brace table
pub const CATCH_ALL_PATTERN: &str = "[^}]*?";

#[derive(Debug, Clone)]
struct CompiledHighlight {
    regex: Regex,
    tag: String,
    label: String,
    tooltip: String,
}

impl CompiledHighlight {
    fn apply(&self, text: &str, registry: &mut TooltipRegistry) -> String {
        if self.tooltip.is_empty() {
            return self
                .regex
                .replace_all(text, |caps: &Captures| {
                    let label = strip_braces(&expand(&self.label, caps));
                    format!("<{tag}>{label}</{tag}>", tag = self.tag)
                })
                .into_owned();
        }

        self.regex
            .replace_all(text, |caps: &Captures| {
                let label = strip_braces(&expand(&self.label, caps));
                let tooltip = expand(&self.tooltip, caps);
                registry.register(&label, &tooltip, &self.tag).to_string()
            })
            .into_owned()
    }
}

/// Compiled brace-highlight table, catch-all included
#[derive(Debug, Clone)]
pub struct BracePass {
    rules: Vec<CompiledHighlight>,
}

impl BracePass {
    pub fn compile(rules: &[HighlightRule]) -> Result<Self, RuleError> {
        let catch_all = HighlightRule::new(CATCH_ALL_PATTERN);
        let rules = rules
            .iter()
            .chain(std::iter::once(&catch_all))
            .enumerate()
            .map(|(index, rule)| {
                Ok(CompiledHighlight {
                    regex: delimited_regex(
                        RuleTable::Brace,
                        index,
                        '{',
                        '}',
                        &rule.pattern,
                        rule.trailing.as_deref(),
                    )?,
                    tag: rule.tag.clone(),
                    label: rule.label.clone().unwrap_or_else(|| "$0".to_string()),
                    tooltip: rule.tooltip.clone(),
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    /// Number of compiled rules, catch-all included
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str, registry: &mut TooltipRegistry) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc, registry))
    }
}

impl Default for BracePass {
    fn default() -> Self {
        Self::compile(&[]).expect("catch-all pattern is valid")
    }
}
