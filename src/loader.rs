//! Built-in declarative file parsers.
//!
//! The original system ships an XML navigation loader; the Rust-native
//! equivalents here read the same nested-record shape from JSON or YAML.
//! XML stays external: callers with XML files implement
//! [`DeclarativeFileParser`] themselves and install it on the resolver.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{NavResult, NavigationError};
use crate::source::{DeclarativeFileParser, PageRecord};

fn read_file(path: &Path) -> NavResult<String> {
    fs::read_to_string(path).map_err(|e| NavigationError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Parses a JSON file containing an array of page records.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileParser;

impl DeclarativeFileParser for JsonFileParser {
    fn parse(&self, path: &Path) -> NavResult<Vec<PageRecord>> {
        let text = read_file(path)?;
        let records: Vec<PageRecord> =
            serde_json::from_str(&text).map_err(|e| NavigationError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        debug!(path = %path.display(), count = records.len(), "parsed JSON navigation file");
        Ok(records)
    }
}

/// Parses a YAML file containing a sequence of page records.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFileParser;

impl DeclarativeFileParser for YamlFileParser {
    fn parse(&self, path: &Path) -> NavResult<Vec<PageRecord>> {
        let text = read_file(path)?;
        let records: Vec<PageRecord> =
            serde_yaml::from_str(&text).map_err(|e| NavigationError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        debug!(path = %path.display(), count = records.len(), "parsed YAML navigation file");
        Ok(records)
    }
}

/// Dispatches to the JSON or YAML parser by file extension.
///
/// Unknown extensions fail `UnsupportedFormat` so that an XML path without
/// an installed XML parser is reported as a missing collaborator, not a
/// parse error.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoFileParser;

impl DeclarativeFileParser for AutoFileParser {
    fn parse(&self, path: &Path) -> NavResult<Vec<PageRecord>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => JsonFileParser.parse(path),
            Some("yaml") | Some("yml") => YamlFileParser.parse(path),
            _ => Err(NavigationError::UnsupportedFormat(format!(
                "no declarative parser for '{}'",
                path.display()
            ))),
        }
    }
}
