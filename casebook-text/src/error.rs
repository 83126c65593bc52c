//! Error types for rule compilation and dataset builds

use std::fmt;
use std::path::PathBuf;

/// Which rule table a [`RuleError`] originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTable {
    Bracket,
    Brace,
    Mechanics,
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTable::Bracket => write!(f, "bracket"),
            RuleTable::Brace => write!(f, "brace"),
            RuleTable::Mechanics => write!(f, "mechanics"),
        }
    }
}

/// Errors raised while compiling a [`Ruleset`](crate::rules::Ruleset)
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// A rule pattern is not a valid regular expression
    InvalidPattern {
        table: RuleTable,
        index: usize,
        pattern: String,
        message: String,
    },
    /// A mechanics entry has an empty term
    EmptyTerm { index: usize },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::InvalidPattern {
                table,
                index,
                pattern,
                message,
            } => write!(
                f,
                "Invalid {table} rule #{index} pattern '{pattern}': {message}"
            ),
            RuleError::EmptyTerm { index } => {
                write!(f, "Mechanics rule #{index} has an empty term")
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// Errors that can occur while building the published dataset
#[derive(Debug)]
pub enum DatasetError {
    /// Reading or writing a dataset file failed
    Io { path: PathBuf, source: std::io::Error },
    /// A base data file is not valid JSON
    Parse { path: PathBuf, message: String },
    /// A base data file is valid JSON but not an object keyed by id
    NotAnObject(PathBuf),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io { path, source } => {
                write!(f, "I/O error on '{}': {source}", path.display())
            }
            DatasetError::Parse { path, message } => {
                write!(f, "Parse error in '{}': {message}", path.display())
            }
            DatasetError::NotAnObject(path) => {
                write!(f, "Expected a JSON object in '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
