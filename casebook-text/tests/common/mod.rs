//! Shared fixtures: a trimmed-down copy of the site's rule tables

use casebook_text::{Annotator, HighlightRule, KeywordRule, MechanicRule, Ruleset};

pub const BADGE: &str = "font-normal bg-blue-500 text-white text-xs px-1 me-1 rounded";
pub const PARTNER: &str = "bg-pink-600 text-white text-xs px-1 me-1 rounded";

pub fn ruleset() -> Ruleset {
    Ruleset {
        bracket: vec![
            KeywordRule::new("结案", "font-normal bg-black text-white text-xs px-1 me-1 rounded"),
            KeywordRule::new("登场时", BADGE).with_tooltip("此角色于现场登场时发动"),
            KeywordRule::new("(搭档: )([一-龥a-zA-Z0-9_]+)", PARTNER)
                .with_label(r#"搭档 <span class="card-color card-color--$3">$3</span>"#)
                .with_tooltip("此能力只能在我方搭档颜色是$3色时使用"),
            KeywordRule::new("推理", BADGE).with_tooltip("推理时发动"),
            KeywordRule::new("回合1", BADGE)
                .with_label("回合1")
                .with_tooltip("每回合只能发动1次"),
        ],
        brace: vec![
            HighlightRule::new("迅速")
                .with_tag("b")
                .with_tooltip("登场回合可以立刻进行推理或行动"),
            HighlightRule::new("误导([0-9]+)")
                .with_tag("b")
                .with_tooltip("将此角色休眠，对手进行推理时LP-$2"),
            HighlightRule::new("突击")
                .with_tag("b")
                .with_trailing("［角色］")
                .with_tooltip("登场回合可以立刻以角色为对象进行行动"),
            HighlightRule::new("突击")
                .with_tag("b")
                .with_tooltip("登场回合可以立刻进行行动"),
        ],
        mechanics: vec![
            MechanicRule::new("推理", "休眠该牌以获得基于该牌LP数量的证据"),
            MechanicRule::new("能力", "能力说明"),
            MechanicRule::new("效果", ""),
        ],
    }
}

pub fn annotator() -> Annotator {
    Annotator::new(&ruleset()).expect("fixture ruleset compiles")
}
