//! Published dataset build
//!
//! Crawled data is incomplete, so every source file `<name>.json` is combined with the
//! hand-maintained overrides `<name>.additional*.json` that sit next to it before being
//! written to the published data directory.
//!
//! - Overrides are deep-merged in file-name order (see [`merge`]).
//! - A malformed override is logged and skipped; a malformed base file is an error.
//! - The card file additionally gets per-card version data (see [`versions`]).
//! - The product file is sorted by key and loses the promo pseudo-product; the type
//!   file loses its `null` type.

pub mod merge;
pub mod versions;

pub use merge::deep_merge;
pub use versions::version_data;

use crate::error::DatasetError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Card source, the one that receives version data
pub const CARDS_SOURCE: &str = "cards_ja";
/// Product source, sorted by key on output
pub const PRODUCTS_SOURCE: &str = "products_ja";
/// Type source
pub const TYPES_SOURCE: &str = "types_ja";

const DROPPED_PRODUCT: &str = "products.PRカード";
const DROPPED_TYPE: &str = "types.null";

/// Where to read, what to read and how to write
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOptions {
    pub source_dir: PathBuf,
    pub out_dir: PathBuf,
    pub sources: Vec<String>,
    pub pretty: bool,
}

/// Outcome of building one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub entries: usize,
    pub merged: Vec<String>,
    pub skipped: Vec<String>,
}

/// Build every configured source and write it to the output directory.
pub fn build(options: &DatasetOptions) -> Result<Vec<SourceReport>, DatasetError> {
    fs::create_dir_all(&options.out_dir).map_err(|source| DatasetError::Io {
        path: options.out_dir.clone(),
        source,
    })?;

    let mut reports = Vec::with_capacity(options.sources.len());
    for name in &options.sources {
        let (data, report) = build_source(&options.source_dir, name)?;
        let target = options.out_dir.join(format!("{name}.json"));
        let serialized = if options.pretty {
            serde_json::to_string_pretty(&data)
        } else {
            serde_json::to_string(&data)
        }
        .map_err(|err| DatasetError::Parse {
            path: target.clone(),
            message: err.to_string(),
        })?;
        fs::write(&target, serialized).map_err(|source| DatasetError::Io {
            path: target.clone(),
            source,
        })?;
        tracing::info!(
            source = %name,
            entries = report.entries,
            merged = report.merged.len(),
            "wrote {}",
            target.display()
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Merge one source with its overrides and apply its post-processing.
pub fn build_source(source_dir: &Path, name: &str) -> Result<(Value, SourceReport), DatasetError> {
    let base_path = source_dir.join(format!("{name}.json"));
    let mut data = read_json(&base_path)?;
    if !data.is_object() {
        return Err(DatasetError::NotAnObject(base_path));
    }

    let mut merged = Vec::new();
    let mut skipped = Vec::new();
    for path in additional_files(source_dir, name)? {
        let file_name = display_name(&path);
        match read_json(&path) {
            Ok(additional) => {
                deep_merge(&mut data, additional);
                tracing::info!(file = %file_name, "merged override");
                merged.push(file_name);
            }
            Err(err) => {
                tracing::error!(error = %err, "skipping override");
                skipped.push(file_name);
            }
        }
    }

    match (name, &mut data) {
        (CARDS_SOURCE, data) => {
            let versions = data.as_object().map(version_data).unwrap_or_default();
            deep_merge(data, Value::Object(versions));
        }
        (PRODUCTS_SOURCE, Value::Object(entries)) => {
            *entries = sorted(without(std::mem::take(entries), DROPPED_PRODUCT));
        }
        (TYPES_SOURCE, Value::Object(entries)) => {
            *entries = without(std::mem::take(entries), DROPPED_TYPE);
        }
        _ => {}
    }

    let entries = data.as_object().map_or(0, Map::len);
    Ok((
        data,
        SourceReport {
            name: name.to_string(),
            entries,
            merged,
            skipped,
        },
    ))
}

/// Override files for `name` in `dir`, sorted by file name.
pub fn additional_files(dir: &Path, name: &str) -> Result<Vec<PathBuf>, DatasetError> {
    let prefix = format!("{name}.additional");
    let read_dir = fs::read_dir(dir).map_err(|source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = read_dir
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".json"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn read_json(path: &Path) -> Result<Value, DatasetError> {
    let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|err| DatasetError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn sorted(entries: Map<String, Value>) -> Map<String, Value> {
    let mut pairs: Vec<(String, Value)> = entries.into_iter().collect();
    pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
    pairs.into_iter().collect()
}

// Rebuilt rather than `remove`d so the remaining keys keep their order.
fn without(entries: Map<String, Value>, dropped: &str) -> Map<String, Value> {
    entries.into_iter().filter(|(key, _)| key != dropped).collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
