use crate::common::annotator;
use casebook_text::registry::{contains_placeholder, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
use casebook_text::TooltipRegistry;
use proptest::prelude::*;
use proptest::sample::select;

const FRAGMENTS: &[&str] = &[
    "[登场时]",
    "{迅速}",
    "{误导2}",
    "{突击}［角色］",
    "{某技能}",
    "[搭档: 蓝]",
    "[推理]",
    "[结案]",
    "能力",
    "推理",
    "效果",
    "[",
    "]",
    "{",
    "}",
    "\u{E000}",
    "\u{E001}",
    "1",
    "。",
    "文本",
    " ",
];

fn card_text() -> impl Strategy<Value = String> {
    prop::collection::vec(select(FRAGMENTS), 0..16).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn output_has_no_placeholders(raw in card_text()) {
        let out = annotator().annotate(&raw);
        prop_assert!(!contains_placeholder(&out));
        prop_assert!(!out.contains(PLACEHOLDER_OPEN));
        prop_assert!(!out.contains(PLACEHOLDER_CLOSE));
    }

    #[test]
    fn resolution_is_idempotent(raw in card_text()) {
        let mut registry = TooltipRegistry::new();
        let out = annotator().annotate_with(&mut registry, &raw);
        prop_assert_eq!(registry.resolve(&out), out);
    }

    #[test]
    fn every_registered_tooltip_is_rendered_once(raw in card_text()) {
        let mut registry = TooltipRegistry::new();
        let out = annotator().annotate_with(&mut registry, &raw);
        prop_assert_eq!(out.matches(r#"class="tooltiptext""#).count(), registry.len());
    }

    #[test]
    fn annotation_is_deterministic(raw in card_text()) {
        let annotator = annotator();
        prop_assert_eq!(annotator.annotate(&raw), annotator.annotate(&raw));
    }

    #[test]
    fn no_brace_token_survives(raw in "[一-龥a-z ]{0,8}") {
        let out = annotator().annotate(&format!("{{{raw}}}"));
        prop_assert!(!out.contains('{'), "output still contains '{{': {}", out);
        prop_assert!(!out.contains('}'), "output still contains '}}': {}", out);
    }
}
