//! Shared configuration loader for the casebook tools.
//!
//! `defaults/casebook.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`CasebookConfig`].
//!
//! The annotation ruleset is versioned data of its own and is not layered: a ruleset
//! is always swapped as a whole. [`CasebookConfig::ruleset`] reads it from
//! `rules_file`, or from the embedded `defaults/rules.default.toml` when no file is
//! configured.

use casebook_text::card::Decoration;
use casebook_text::{CardDecorations, DatasetOptions, Ruleset};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/casebook.default.toml");
const DEFAULT_RULES_TOML: &str = include_str!("../defaults/rules.default.toml");

/// Top-level configuration consumed by casebook applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CasebookConfig {
    /// Ruleset file replacing the built-in tables
    #[serde(default)]
    pub rules_file: Option<PathBuf>,
    pub log: LogConfig,
    pub card: CardConfig,
    pub dataset: DatasetConfig,
}

impl CasebookConfig {
    /// The effective annotation ruleset.
    pub fn ruleset(&self) -> Result<Ruleset, ConfigError> {
        match &self.rules_file {
            Some(path) => load_ruleset(path),
            None => default_ruleset(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter directive
    pub level: String,
}

/// Badges and markers used when composing card text.
#[derive(Debug, Clone, Deserialize)]
pub struct CardConfig {
    pub empty_marker: String,
    pub disguise: DecorationConfig,
    pub cut_in: DecorationConfig,
    pub inspiration: DecorationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecorationConfig {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub tooltip: String,
}

impl From<DecorationConfig> for Decoration {
    fn from(config: DecorationConfig) -> Self {
        Decoration {
            key: config.key,
            label: config.label,
            tooltip: config.tooltip,
        }
    }
}

impl From<CardConfig> for CardDecorations {
    fn from(config: CardConfig) -> Self {
        CardDecorations {
            disguise: config.disguise.into(),
            cut_in: config.cut_in.into(),
            inspiration: config.inspiration.into(),
            empty_marker: config.empty_marker,
        }
    }
}

impl From<&CardConfig> for CardDecorations {
    fn from(config: &CardConfig) -> Self {
        config.clone().into()
    }
}

/// Where the dataset build reads and writes.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub source_dir: PathBuf,
    pub out_dir: PathBuf,
    pub sources: Vec<String>,
    pub pretty: bool,
}

impl From<DatasetConfig> for DatasetOptions {
    fn from(config: DatasetConfig) -> Self {
        DatasetOptions {
            source_dir: config.source_dir,
            out_dir: config.out_dir,
            sources: config.sources,
            pretty: config.pretty,
        }
    }
}

impl From<&DatasetConfig> for DatasetOptions {
    fn from(config: &DatasetConfig) -> Self {
        config.clone().into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CasebookConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CasebookConfig, ConfigError> {
    Loader::new().build()
}

/// The ruleset shipped with the tools.
pub fn default_ruleset() -> Result<Ruleset, ConfigError> {
    Config::builder()
        .add_source(File::from_str(DEFAULT_RULES_TOML, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

/// Read a complete ruleset from a TOML file.
pub fn load_ruleset(path: impl AsRef<Path>) -> Result<Ruleset, ConfigError> {
    Config::builder()
        .add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(true),
        )
        .build()?
        .try_deserialize()
}
