//! Source resolution: normalize heterogeneous navigation inputs into one
//! canonical nested-record shape.
//!
//! Four input shapes are accepted, modeled as a closed tagged variant rather
//! than runtime type inspection at call sites: inline records, a structured
//! config value, a declarative file path, and a pre-built factory. The first
//! three normalize to `Vec<PageRecord>`; a factory bypasses normalization and
//! is delegated to directly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{NavResult, NavigationError};
use crate::factory::ContainerFactory;

/// One normalized navigation record.
///
/// `label` is optional at the serde layer so that malformed input can be
/// reported with a positional path instead of an opaque deserialize error;
/// validation requires it. Unknown keys in config input are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageRecord>,
}

impl PageRecord {
    /// Record linking to a literal URI.
    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Record targeting a named route.
    pub fn route(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            route: Some(route.into()),
            ..Self::default()
        }
    }

    /// Label-only branch record.
    pub fn branch(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Attach child records, preserving order.
    pub fn with_pages(mut self, pages: Vec<PageRecord>) -> Self {
        self.pages = pages;
        self
    }
}

/// The input shapes a navigation container can be requested from.
#[derive(Clone)]
pub enum NavigationSource {
    /// In-memory nested record sequence; passed through after validation.
    Inline(Vec<PageRecord>),
    /// Structured config value; must be a JSON array of page objects
    /// (arrays carry the order, which is render order).
    Config(JsonValue),
    /// Path to a declarative file; handled by the configured parser.
    File(PathBuf),
    /// Pre-built factory implementing the build contract; delegated to
    /// directly, bypassing normalization.
    Factory(Arc<dyn ContainerFactory>),
}

impl NavigationSource {
    fn kind(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::Config(_) => "config",
            Self::File(_) => "file",
            Self::Factory(_) => "factory",
        }
    }
}

impl std::fmt::Debug for NavigationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline(records) => f.debug_tuple("Inline").field(records).finish(),
            Self::Config(value) => f.debug_tuple("Config").field(value).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<Vec<PageRecord>> for NavigationSource {
    fn from(records: Vec<PageRecord>) -> Self {
        Self::Inline(records)
    }
}

impl From<JsonValue> for NavigationSource {
    fn from(value: JsonValue) -> Self {
        Self::Config(value)
    }
}

impl From<PathBuf> for NavigationSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

/// Outcome of source resolution.
pub enum Resolved {
    /// Canonical normalized record sequence, ready for the tree builder.
    Records(Vec<PageRecord>),
    /// The source was itself a factory; the caller delegates to it.
    Delegated(Arc<dyn ContainerFactory>),
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Records(records) => f.debug_tuple("Records").field(records).finish(),
            Self::Delegated(_) => f.debug_tuple("Delegated").finish(),
        }
    }
}

/// Parses a declarative navigation file into normalized records.
///
/// Parsing is delegated: the core only defines the contract. Built-in JSON
/// and YAML implementations live in [`crate::loader`]; anything else (the
/// original ships XML) is supplied by the caller.
pub trait DeclarativeFileParser: Send + Sync {
    fn parse(&self, path: &Path) -> NavResult<Vec<PageRecord>>;
}

/// Normalizes heterogeneous inputs into the canonical record shape.
#[derive(Default)]
pub struct SourceResolver {
    parser: Option<Arc<dyn DeclarativeFileParser>>,
}

impl SourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a declarative file parser for the file-path strategy.
    pub fn with_parser(parser: Arc<dyn DeclarativeFileParser>) -> Self {
        Self {
            parser: Some(parser),
        }
    }

    /// Resolve an input to normalized records, or delegate to a factory.
    ///
    /// An empty top-level sequence is a valid empty navigation, not an
    /// error. A malformed record fails with `InvalidSourceKind` carrying the
    /// positional path of the offending record.
    pub fn resolve(&self, source: NavigationSource) -> NavResult<Resolved> {
        debug!(kind = source.kind(), "resolving navigation source");
        match source {
            NavigationSource::Inline(records) => {
                validate_records(&records, "pages")?;
                Ok(Resolved::Records(records))
            }
            NavigationSource::Config(value) => {
                let records = flatten_config(value)?;
                validate_records(&records, "pages")?;
                Ok(Resolved::Records(records))
            }
            NavigationSource::File(path) => match &self.parser {
                Some(parser) => {
                    let records = parser.parse(&path)?;
                    validate_records(&records, "pages")?;
                    Ok(Resolved::Records(records))
                }
                None => Err(NavigationError::UnsupportedFormat(format!(
                    "file source '{}' with no declarative parser installed",
                    path.display()
                ))),
            },
            NavigationSource::Factory(factory) => Ok(Resolved::Delegated(factory)),
        }
    }
}

/// Flatten a structured config value into the record shape, order preserved.
///
/// Only a top-level JSON array carries a meaningful order; `null` is treated
/// as an empty navigation, anything else is `InvalidSourceKind`.
fn flatten_config(value: JsonValue) -> NavResult<Vec<PageRecord>> {
    let items = match value {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) => items,
        other => {
            return Err(NavigationError::invalid(
                "pages",
                format!("expected an array of page records, got {}", json_kind(&other)),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let path = format!("pages[{idx}]");
            if !item.is_object() {
                return Err(NavigationError::invalid(
                    path,
                    format!("expected a page record object, got {}", json_kind(&item)),
                ));
            }
            serde_json::from_value(item)
                .map_err(|e| NavigationError::invalid(path, e.to_string()))
        })
        .collect()
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Structural validation: every record carries a label, and `uri`/`route`
/// are mutually exclusive. Recurses into `pages` with the same rule.
pub fn validate_records(records: &[PageRecord], path: &str) -> NavResult<()> {
    for (idx, record) in records.iter().enumerate() {
        let here = format!("{path}[{idx}]");
        match &record.label {
            Some(label) if !label.trim().is_empty() => {}
            _ => return Err(NavigationError::invalid(here, "missing label")),
        }
        if record.uri.is_some() && record.route.is_some() {
            return Err(NavigationError::invalid(
                here,
                "both uri and route set; a link targets exactly one",
            ));
        }
        validate_records(&record.pages, &format!("{here}.pages"))?;
    }
    Ok(())
}
