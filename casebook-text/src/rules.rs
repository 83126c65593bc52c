//! Rule tables
//!
//! Rules are plain data. The engine does not ship a ruleset of its own; the tables
//! are loaded from configuration (see the casebook-config crate) and compiled by
//! [`Annotator::new`](crate::annotator::Annotator::new).
//!
//! Template groups, shared by bracket and brace rules:
//! - `$0`: the whole match, delimiters and trailing text included
//! - `$1`: the text between the delimiters
//! - `$2`…: the capture groups of the rule's own pattern, in order

use serde::{Deserialize, Serialize};

fn default_tag() -> String {
    "span".to_string()
}

/// A `[...]` keyword, rendered as a classed badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Regex matched between `[` and `]`
    pub pattern: String,

    /// CSS class of the wrapping span
    #[serde(default)]
    pub class: String,

    /// Visible label template, `$1` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Tooltip template; empty means the keyword is wrapped without a tooltip
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tooltip: String,

    /// Regex that must directly follow the closing `]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing: Option<String>,
}

impl KeywordRule {
    pub fn new(pattern: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            class: class.into(),
            label: None,
            tooltip: String::new(),
            trailing: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn with_trailing(mut self, trailing: impl Into<String>) -> Self {
        self.trailing = Some(trailing.into());
        self
    }
}

/// A `{...}` highlight, rendered inside a plain tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRule {
    /// Regex matched between `{` and `}`
    pub pattern: String,

    /// Wrapping tag name
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Visible label template; the whole match when absent. Braces are always removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tooltip: String,

    /// Regex that must directly follow the closing `}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing: Option<String>,
}

impl HighlightRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            tag: default_tag(),
            label: None,
            tooltip: String::new(),
            trailing: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn with_trailing(mut self, trailing: impl Into<String>) -> Self {
        self.trailing = Some(trailing.into());
        self
    }
}

/// A plain-language game term, explained at its first occurrence only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicRule {
    /// Literal term, not a regex
    pub term: String,

    /// Fixed explanation; entries without one are skipped
    #[serde(default)]
    pub tooltip: String,

    #[serde(default = "default_tag")]
    pub tag: String,
}

impl MechanicRule {
    pub fn new(term: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            tooltip: tooltip.into(),
            tag: default_tag(),
        }
    }
}

/// The three rule tables, each applied in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    #[serde(default)]
    pub bracket: Vec<KeywordRule>,
    #[serde(default)]
    pub brace: Vec<HighlightRule>,
    #[serde(default)]
    pub mechanics: Vec<MechanicRule>,
}

impl Ruleset {
    pub fn is_empty(&self) -> bool {
        self.bracket.is_empty() && self.brace.is_empty() && self.mechanics.is_empty()
    }
}
