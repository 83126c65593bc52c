//! Tooltip registry
//!
//! Rules that produce tooltip HTML never write it into the text stream directly. The
//! HTML contains characters (`<`, `[`, `{`) that later rules would happily match again,
//! so the rendered fragment is stored here and an opaque placeholder takes its place.
//! Once every pass has run, [`TooltipRegistry::resolve`] swaps the placeholders back
//! for the stored HTML.
//!
//! A placeholder is `U+E000`, the 1-based entry index in decimal, then `U+E001`. Both
//! sentinels are private-use code points and are stripped from incoming text by
//! [`strip_sentinels`], so card text can never spell a placeholder by accident.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

/// Opens a placeholder token
pub const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closes a placeholder token
pub const PLACEHOLDER_CLOSE: char = '\u{E001}';

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").expect("placeholder pattern is valid"));

/// Opaque marker standing in for a registered tooltip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(usize);

impl Placeholder {
    /// 1-based index of the registry entry this placeholder refers to
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PLACEHOLDER_OPEN}{}{PLACEHOLDER_CLOSE}", self.0)
    }
}

/// Ordered store of rendered tooltip fragments for one annotation job
#[derive(Debug, Clone, Default)]
pub struct TooltipRegistry {
    entries: Vec<String>,
}

impl TooltipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry. Placeholders issued before the reset are invalid afterwards.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Render a tooltip fragment, store it and return its placeholder.
    ///
    /// The fragment is `<tag class="tooltip">label<span class="tooltiptext">tooltip</span></tag>`.
    pub fn register(&mut self, label: &str, tooltip: &str, tag: &str) -> Placeholder {
        self.push(render(label, tooltip, tag))
    }

    /// Like [`register`](Self::register), with the fragment and `suffix` wrapped in a
    /// `tooltip-container` span. The container is part of the entry, so it never
    /// reaches the text stream.
    pub fn register_contained(
        &mut self,
        label: &str,
        tooltip: &str,
        tag: &str,
        suffix: &str,
    ) -> Placeholder {
        let fragment = render(label, tooltip, tag);
        self.push(format!(
            r#"<span class="tooltip-container">{fragment}{suffix}</span>"#
        ))
    }

    fn push(&mut self, html: String) -> Placeholder {
        self.entries.push(html);
        Placeholder(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every placeholder in `text` with its registered HTML.
    ///
    /// Entries may contain placeholders of entries registered before them (a label
    /// captured from text that was already annotated); those are expanded too. Unknown
    /// indices resolve to nothing and are logged.
    pub fn resolve(&self, text: &str) -> String {
        if !text.contains(PLACEHOLDER_OPEN) {
            return text.to_string();
        }

        // Expand entries in registration order: entry `i` may only refer to entries < i.
        let mut expanded: Vec<String> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let resolved = substitute(entry, &expanded);
            expanded.push(resolved);
        }

        substitute(text, &expanded)
    }
}

fn render(label: &str, tooltip: &str, tag: &str) -> String {
    format!(r#"<{tag} class="tooltip">{label}<span class="tooltiptext">{tooltip}</span></{tag}>"#)
}

fn substitute(text: &str, expanded: &[String]) -> String {
    if !text.contains(PLACEHOLDER_OPEN) {
        return text.to_string();
    }
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            let entry = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|slot| expanded.get(slot));
            match entry {
                Some(html) => html.clone(),
                None => {
                    tracing::warn!(placeholder = &caps[1], "dangling tooltip placeholder");
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Remove placeholder sentinels from untrusted text.
pub fn strip_sentinels(text: &str) -> String {
    text.chars()
        .filter(|c| *c != PLACEHOLDER_OPEN && *c != PLACEHOLDER_CLOSE)
        .collect()
}

/// Whether `text` still carries any placeholder token.
pub fn contains_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}
