//! `[keyword]` pass

use super::delimited_regex;
use crate::error::{RuleError, RuleTable};
use crate::registry::TooltipRegistry;
use crate::rules::KeywordRule;
use crate::template::expand;
use regex::{Captures, Regex};

#[derive(Debug, Clone)]
struct CompiledKeyword {
    regex: Regex,
    class: String,
    label: String,
    tooltip: String,
}

impl CompiledKeyword {
    fn apply(&self, text: &str, registry: &mut TooltipRegistry) -> String {
        if self.tooltip.is_empty() {
            return self
                .regex
                .replace_all(text, |caps: &Captures| {
                    format!(
                        r#"<span class="{}">{}</span>"#,
                        self.class,
                        expand(&self.label, caps)
                    )
                })
                .into_owned();
        }

        // Captures are taken per occurrence, so each badge gets its own tooltip text.
        self.regex
            .replace_all(text, |caps: &Captures| {
                let label = expand(&self.label, caps);
                let tooltip = expand(&self.tooltip, caps);
                let placeholder = registry.register(&label, &tooltip, "span");
                format!(r#"<span class="{}">{placeholder}</span>"#, self.class)
            })
            .into_owned()
    }
}

/// Compiled bracket-keyword table
#[derive(Debug, Clone, Default)]
pub struct BracketPass {
    rules: Vec<CompiledKeyword>,
}

impl BracketPass {
    pub fn compile(rules: &[KeywordRule]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                Ok(CompiledKeyword {
                    regex: delimited_regex(
                        RuleTable::Bracket,
                        index,
                        '[',
                        ']',
                        &rule.pattern,
                        rule.trailing.as_deref(),
                    )?,
                    class: rule.class.clone(),
                    label: rule.label.clone().unwrap_or_else(|| "$1".to_string()),
                    tooltip: rule.tooltip.clone(),
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite every bracket keyword in `text`, rule by rule.
    pub fn apply(&self, text: &str, registry: &mut TooltipRegistry) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc, registry))
    }
}
