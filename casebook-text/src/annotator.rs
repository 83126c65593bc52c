//! Annotation pipeline
//!
//! [`Annotator`] holds the compiled rule tables and is immutable once built, so one
//! instance can serve any number of texts (and threads). Every text is annotated by an
//! [`AnnotationJob`], which owns a fresh [`TooltipRegistry`]. The job is consumed by
//! [`AnnotationJob::finish`], so nothing can register after placeholders are resolved.
//!
//! Pass order matters:
//!
//! 1. mechanics: before the keyword passes, so a term that sits inside a bracket token
//!    is only protected by the `[` guard
//! 2. brackets: before braces, so brace rules never see raw bracket syntax
//! 3. braces
//! 4. placeholder resolution

use crate::error::RuleError;
use crate::passes::{BracePass, BracketPass, MechanicsPass};
use crate::registry::{strip_sentinels, Placeholder, TooltipRegistry};
use crate::rules::Ruleset;

/// Compiled ruleset, ready to annotate card text
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    mechanics: MechanicsPass,
    brackets: BracketPass,
    braces: BracePass,
}

impl Annotator {
    /// Compile every table of `rules`.
    pub fn new(rules: &Ruleset) -> Result<Self, RuleError> {
        let annotator = Self {
            mechanics: MechanicsPass::compile(&rules.mechanics)?,
            brackets: BracketPass::compile(&rules.bracket)?,
            braces: BracePass::compile(&rules.brace)?,
        };
        tracing::debug!(
            mechanics = annotator.mechanics.len(),
            brackets = annotator.brackets.len(),
            braces = annotator.braces.len(),
            "compiled ruleset"
        );
        Ok(annotator)
    }

    /// Start a job with an empty registry.
    pub fn job(&self) -> AnnotationJob<'_> {
        AnnotationJob {
            annotator: self,
            registry: TooltipRegistry::new(),
        }
    }

    /// Annotate one ability text: mechanics, brackets, braces, then resolve.
    pub fn annotate(&self, raw: &str) -> String {
        let mut job = self.job();
        let text = job.mechanics(raw);
        let text = job.keywords(&text);
        job.finish(&text)
    }

    /// Annotate using a caller-provided registry, resetting it first.
    ///
    /// The registry is left populated so callers can inspect what was registered.
    pub fn annotate_with(&self, registry: &mut TooltipRegistry, raw: &str) -> String {
        registry.reset();
        let text = strip_sentinels(raw);
        let text = self.mechanics.apply(&text, registry);
        let text = self.brackets.apply(&text, registry);
        let text = self.braces.apply(&text, registry);
        registry.resolve(&text)
    }

    pub fn mechanics_pass(&self) -> &MechanicsPass {
        &self.mechanics
    }

    pub fn bracket_pass(&self) -> &BracketPass {
        &self.brackets
    }

    pub fn brace_pass(&self) -> &BracePass {
        &self.braces
    }
}

/// One annotation session: a registry generation plus the passes that fill it
#[derive(Debug)]
pub struct AnnotationJob<'a> {
    annotator: &'a Annotator,
    registry: TooltipRegistry,
}

impl AnnotationJob<'_> {
    /// First-occurrence mechanics annotation of a raw fragment.
    pub fn mechanics(&mut self, raw: &str) -> String {
        let text = strip_sentinels(raw);
        self.annotator.mechanics.apply(&text, &mut self.registry)
    }

    /// Bracket then brace annotation.
    ///
    /// Placeholders issued by this job survive; any other sentinel characters do not.
    pub fn keywords(&mut self, text: &str) -> String {
        let text = self.annotator.brackets.apply(text, &mut self.registry);
        self.annotator.braces.apply(&text, &mut self.registry)
    }

    /// Register a tooltip whose label and text are already final HTML.
    pub fn tooltip(&mut self, label: &str, tooltip: &str, tag: &str) -> Placeholder {
        self.registry.register(label, tooltip, tag)
    }

    /// Number of tooltips registered so far
    pub fn registered(&self) -> usize {
        self.registry.len()
    }

    /// Resolve every placeholder and end the job.
    pub fn finish(self, text: &str) -> String {
        tracing::trace!(tooltips = self.registry.len(), "resolving placeholders");
        self.registry.resolve(text)
    }
}
