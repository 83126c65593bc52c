//! Visible text of annotated HTML
//!
//! Annotated output is parsed with html5ever and its text nodes collected, skipping
//! tooltip bodies (`class="tooltiptext"`). Used for search text and in tests.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// CSS class carried by tooltip bodies
pub const TOOLTIP_BODY_CLASS: &str = "tooltiptext";

/// Text a reader sees without hovering anything.
pub fn visible_text(html: &str) -> String {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut out = String::new();
    collect_text(&dom.document, &mut out);
    out
}

/// Visible text with whitespace and square brackets removed, as used for search.
pub fn search_text(html: &str) -> String {
    visible_text(html)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '[' && *c != ']')
        .collect()
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { attrs, .. } if has_class(&attrs.borrow(), TOOLTIP_BODY_CLASS) => {
            return
        }
        _ => {}
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}

fn has_class(attrs: &[Attribute], class: &str) -> bool {
    attrs.iter().any(|attr| {
        &*attr.name.local == "class" && attr.value.split_whitespace().any(|c| c == class)
    })
}
