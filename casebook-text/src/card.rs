//! Card text composition
//!
//! A card's ability text is spread over several crawled fields: the regular feature
//! text and up to three special variants (disguise, cut-in, inspiration). This module
//! decorates each variant, joins them and runs the keyword passes once over the whole,
//! all inside a single [`AnnotationJob`](crate::annotator::AnnotationJob) so the card
//! shares one registry generation.

use crate::annotator::{AnnotationJob, Annotator};
use crate::plain::search_text;
use crate::registry::strip_sentinels;
use serde::{Deserialize, Serialize};

/// Raw ability fields of a card, as produced by the crawler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFields {
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default, alias = "henso")]
    pub disguise: Option<String>,
    #[serde(default, alias = "cut-in")]
    pub cut_in: Option<String>,
    #[serde(default, alias = "hirameki")]
    pub inspiration: Option<String>,
}

/// Badge placed in front of a special ability variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    /// Special key reported for cards carrying this variant
    pub key: String,
    /// Badge HTML
    pub label: String,
    /// Badge tooltip; without one the label is inserted as is and left to the keyword passes
    #[serde(default)]
    pub tooltip: String,
}

/// Decorations and markers used when composing card text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDecorations {
    pub disguise: Decoration,
    pub cut_in: Decoration,
    pub inspiration: Decoration,
    /// Search text and special key used when a card has nothing to show
    pub empty_marker: String,
}

impl Default for CardDecorations {
    fn default() -> Self {
        Self {
            disguise: Decoration {
                key: "变装".to_string(),
                label: r#"<img src="img/disguise.svg" class="inline-icon"><b class="whitespace-nowrap">变装</b>"#.to_string(),
                tooltip: "从手牌中打出替换接触中的角色。将被替换的角色移入卡组底".to_string(),
            },
            cut_in: Decoration {
                key: "介入".to_string(),
                label: "[介入]".to_string(),
                tooltip: String::new(),
            },
            inspiration: Decoration {
                key: "灵光一闪".to_string(),
                label: r#"<img src="img/hirameki.svg" class="inline-icon"><b class="whitespace-nowrap">灵光一闪</b>"#.to_string(),
                tooltip: "作为证据被移除时发动".to_string(),
            },
            empty_marker: "无".to_string(),
        }
    }
}

/// Composed card text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardText {
    /// Annotated HTML, placeholders resolved
    pub html: String,
    /// Visible text without tooltips, whitespace or brackets
    ///
    /// Taken from `html`, so the variants appear in html order (feature, disguise,
    /// cut-in, inspiration). The site's own search string puts inspiration before
    /// disguise; substring search does not depend on the order.
    pub plain: String,
    /// Special ability variants present on the card
    pub special_keys: Vec<String>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.trim().is_empty())
}

fn badge(job: &mut AnnotationJob<'_>, decoration: &Decoration) -> String {
    if decoration.tooltip.is_empty() {
        decoration.label.clone()
    } else {
        job.tooltip(&decoration.label, &decoration.tooltip, "span")
            .to_string()
    }
}

/// Compose the annotated text of one card.
pub fn compose(
    annotator: &Annotator,
    fields: &CardFields,
    decorations: &CardDecorations,
) -> CardText {
    let mut job = annotator.job();
    let mut fragments = Vec::new();
    let mut special_keys = Vec::new();

    if let Some(feature) = non_empty(&fields.feature) {
        fragments.push(job.mechanics(feature));
    }

    if let Some(disguise) = non_empty(&fields.disguise) {
        let badge = badge(&mut job, &decorations.disguise);
        fragments.push(format!(
            r#"<span class="henso-line mb-1 mt-1 rounded-lg"><span class="text-fuchsia-400 me-1">{badge}</span> {}</span>"#,
            strip_sentinels(disguise)
        ));
        special_keys.push(decorations.disguise.key.clone());
    }

    if let Some(cut_in) = non_empty(&fields.cut_in) {
        let text = job.mechanics(cut_in);
        let badge = badge(&mut job, &decorations.cut_in);
        fragments.push(format!(
            r#"<span class="cut-in-line mb-1 mt-1 rounded-lg"><b class="whitespace-nowrap px-1">{badge}</b> {text}</span>"#
        ));
        special_keys.push(decorations.cut_in.key.clone());
    }

    if let Some(inspiration) = non_empty(&fields.inspiration) {
        let badge = badge(&mut job, &decorations.inspiration);
        fragments.push(format!(
            r#"<span class="hirameki-line mb-1 mt-1 rounded-lg"><span class="text-orange-500 me-1">{badge}</span> <b>{}</b></span>"#,
            strip_sentinels(inspiration)
        ));
        special_keys.push(decorations.inspiration.key.clone());
    }

    let joined = fragments.join("\n");
    let text = job.keywords(&joined);
    let html = job.finish(&text);

    let mut plain = search_text(&html);
    if plain.is_empty() {
        plain = decorations.empty_marker.clone();
    }
    if special_keys.is_empty() {
        special_keys.push(decorations.empty_marker.clone());
    }

    CardText {
        html,
        plain,
        special_keys,
    }
}
