use crate::common::{annotator, BADGE, PARTNER};
use casebook_text::plain::visible_text;
use casebook_text::passes::{BracePass, BracketPass};
use casebook_text::{Annotator, HighlightRule, KeywordRule, Ruleset, TooltipRegistry};

#[test]
fn test_bracket_capture_substitution() {
    let out = annotator().annotate("[搭档: 蓝]");

    assert!(out.contains("此能力只能在我方搭档颜色是蓝色时使用"));
    assert!(out.starts_with(&format!(
        r#"<span class="{PARTNER}"><span class="tooltip">搭档 <span class="card-color card-color--蓝">蓝</span>"#
    )));
}

#[test]
fn test_bracket_captures_are_per_occurrence() {
    let out = annotator().annotate("[搭档: 蓝]或[搭档: 红]");
    assert!(out.contains("颜色是蓝色时使用"));
    assert!(out.contains("颜色是红色时使用"));
}

#[test]
fn test_bracket_match_is_case_insensitive() {
    let rules = Ruleset {
        bracket: vec![KeywordRule::new("mr", "mr").with_tooltip("MR能力")],
        ..Default::default()
    };
    let annotator = Annotator::new(&rules).unwrap();
    let out = annotator.annotate("[MR]");
    assert_eq!(
        out,
        r#"<span class="mr"><span class="tooltip">MR<span class="tooltiptext">MR能力</span></span></span>"#
    );
}

#[test]
fn test_tooltip_free_rule_leaves_registry_unchanged() {
    let pass = BracketPass::compile(&[KeywordRule::new("结案", "badge")]).unwrap();
    let mut registry = TooltipRegistry::new();
    registry.register("x", "y", "span");

    let out = pass.apply("[结案]和[结案]", &mut registry);

    assert_eq!(registry.len(), 1);
    assert_eq!(
        out,
        r#"<span class="badge">结案</span>和<span class="badge">结案</span>"#
    );
}

#[test]
fn test_tooltip_free_brace_rule_leaves_registry_unchanged() {
    let pass = BracePass::compile(&[HighlightRule::new("特征不?为?［[^］}]*?］").with_tag("b")]).unwrap();
    let mut registry = TooltipRegistry::new();

    let out = pass.apply("{特征为［侦探］}", &mut registry);

    assert!(registry.is_empty());
    assert_eq!(out, "<b>特征为［侦探］</b>");
}

#[test]
fn test_brace_catch_all_strips_delimiters() {
    let out = annotator().annotate("{某技能}");

    assert_eq!(out, "<span>某技能</span>");
    assert_eq!(visible_text(&out), "某技能");
}

#[test]
fn test_brace_capture_substitution() {
    let out = annotator().annotate("{误导3}");
    assert_eq!(
        out,
        r#"<b class="tooltip">误导3<span class="tooltiptext">将此角色休眠，对手进行推理时LP-3</span></b>"#
    );
}

#[test]
fn test_brace_trailing_text_selects_rule() {
    let annotator = annotator();

    let targeted = annotator.annotate("{突击}［角色］");
    assert!(targeted.contains("以角色为对象进行行动"));
    assert!(targeted.contains("突击［角色］<span"));

    let plain = annotator.annotate("{突击}");
    assert!(plain.contains("登场回合可以立刻进行行动"));
    assert!(!plain.contains("以角色为对象"));
}

#[test]
fn test_bracket_output_is_not_rescanned() {
    // The tooltip text of 迅速 mentions 推理, which is also a bracket and mechanics term.
    let mut registry = TooltipRegistry::new();
    let out = annotator().annotate_with(&mut registry, "{迅速}");

    assert_eq!(registry.len(), 1);
    assert!(out.contains("进行推理或行动"));
}

#[test]
fn test_later_bracket_rule_only_sees_remaining_tokens() {
    let out = annotator().annotate("[登场时][结案]");
    assert!(out.contains(&format!(r#"<span class="{BADGE}"><span class="tooltip">登场时"#)));
    assert!(out.ends_with(
        r#"<span class="font-normal bg-black text-white text-xs px-1 me-1 rounded">结案</span>"#
    ));
}

#[test]
fn test_unknown_bracket_token_is_left_alone() {
    assert_eq!(annotator().annotate("[未知]"), "[未知]");
}

#[test]
fn test_empty_brackets_degrade_gracefully() {
    let rules = Ruleset {
        bracket: vec![KeywordRule::new("(x?)", "empty")
            .with_label("[$2]")
            .with_tooltip("<$2|$9>")],
        ..Default::default()
    };
    let annotator = Annotator::new(&rules).unwrap();
    assert_eq!(
        annotator.annotate("[]"),
        r#"<span class="empty"><span class="tooltip">[]<span class="tooltiptext"><|></span></span></span>"#
    );
}
