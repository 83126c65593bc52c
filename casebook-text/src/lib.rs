//! Card text annotation for the casebook card database
//!
//!     Crawled card text is plain text with a light markup of its own: `[登场时]` marks a
//!     timing keyword, `{迅速}` a rules abbreviation, and game terms such as 推理 appear in
//!     running prose. This crate turns that text into HTML where every such token carries
//!     an explanatory tooltip, and builds the published JSON dataset the site reads.
//!
//!     This is a pure lib: it powers the casebook cli but assumes no shell. Nothing here
//!     prints, reads env vars or exits.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs
//!     ├── rules.rs                # Rule tables (plain serde data)
//!     ├── template.rs             # `$n` capture templates
//!     ├── registry.rs             # Tooltip registry and placeholders
//!     ├── passes
//!     │   ├── mechanics.rs        # First-occurrence game terms
//!     │   ├── bracket.rs          # `[keyword]`
//!     │   └── brace.rs            # `{highlight}`, catch-all included
//!     ├── annotator.rs            # Pipeline and annotation jobs
//!     ├── plain.rs                # Visible / search text of annotated HTML
//!     ├── card.rs                 # Per-card composition of the ability fields
//!     └── dataset                 # Published data build (overrides, versions)
//!
//! Core Algorithm
//!
//!     Passes run in a fixed order over the text: mechanics, brackets, braces. A rule that
//!     produces tooltip HTML does not write it into the text. The HTML goes into the job's
//!     [`TooltipRegistry`] and an opaque placeholder takes its place, so later rules can't
//!     match inside markup or tooltip bodies. When all passes are done the placeholders are
//!     resolved back into HTML. The result therefore never depends on what a tooltip says.
//!
//!     Rules are data. The crate ships no ruleset; tables come from configuration and are
//!     compiled once into an [`Annotator`], which is immutable and can be shared freely.
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs
//!     ├── annotate                # Pipeline properties and scenarios
//!     ├── card                    # Card composition
//!     └── dataset                 # Dataset build over temp dirs
//!
pub mod annotator;
pub mod card;
pub mod dataset;
pub mod error;
pub mod passes;
pub mod plain;
pub mod registry;
pub mod rules;
pub mod template;

pub use annotator::{AnnotationJob, Annotator};
pub use card::{compose, CardDecorations, CardFields, CardText, Decoration};
pub use dataset::{DatasetOptions, SourceReport};
pub use error::{DatasetError, RuleError, RuleTable};
pub use registry::{Placeholder, TooltipRegistry};
pub use rules::{HighlightRule, KeywordRule, MechanicRule, Ruleset};
