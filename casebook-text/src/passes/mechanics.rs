//! First-occurrence mechanics pass
//!
//! A game term is explained the first time it shows up in a text and left alone after
//! that. The term must not directly follow `[`: there it is the content of a bracket
//! keyword, which carries its own annotation. One trailing punctuation mark is folded
//! into the container so the highlight ends cleanly.

use crate::error::RuleError;
use crate::registry::TooltipRegistry;
use crate::rules::MechanicRule;
use regex::Regex;

const TRAILING_PUNCTUATION: &str = "，。！？：；.!?;:";

#[derive(Debug, Clone)]
struct CompiledMechanic {
    regex: Regex,
    tooltip: String,
    tag: String,
}

impl CompiledMechanic {
    fn apply(&self, text: &str, registry: &mut TooltipRegistry) -> String {
        let Some(caps) = self.regex.captures(text) else {
            return text.to_string();
        };
        let (Some(whole), Some(term)) = (caps.get(0), caps.get(2)) else {
            return text.to_string();
        };
        let prefix = caps.get(1).map_or("", |m| m.as_str());
        let punctuation = caps.get(3).map_or("", |m| m.as_str());
        let placeholder =
            registry.register_contained(term.as_str(), &self.tooltip, &self.tag, punctuation);

        let mut out = String::with_capacity(text.len() + 8);
        out.push_str(&text[..whole.start()]);
        out.push_str(prefix);
        out.push_str(&placeholder.to_string());
        out.push_str(&text[whole.end()..]);
        out
    }
}

/// Compiled mechanics table
#[derive(Debug, Clone, Default)]
pub struct MechanicsPass {
    rules: Vec<CompiledMechanic>,
}

impl MechanicsPass {
    pub fn compile(rules: &[MechanicRule]) -> Result<Self, RuleError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            if rule.term.is_empty() {
                return Err(RuleError::EmptyTerm { index });
            }
            if rule.tooltip.is_empty() {
                tracing::debug!(term = %rule.term, "skipping mechanic without tooltip");
                continue;
            }
            // Start of text counts as a non-`[` predecessor.
            let source = format!(
                r"(^|[^\[])({})([{}]?)",
                regex::escape(&rule.term),
                regex::escape(TRAILING_PUNCTUATION)
            );
            let regex = Regex::new(&source).map_err(|err| RuleError::InvalidPattern {
                table: crate::error::RuleTable::Mechanics,
                index,
                pattern: rule.term.clone(),
                message: err.to_string(),
            })?;
            compiled.push(CompiledMechanic {
                regex,
                tooltip: rule.tooltip.clone(),
                tag: rule.tag.clone(),
            });
        }
        Ok(Self { rules: compiled })
    }

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
