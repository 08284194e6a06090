//! Tree construction from normalized records.
//!
//! Construction is pure: no external references are resolved here. Route
//! records produce nodes in the `Unresolved` binding state; the injector
//! binds components afterwards.

use tracing::debug;

use crate::container::NavigationContainer;
use crate::error::{NavResult, NavigationError};
use crate::page::PageNode;
use crate::source::PageRecord;

/// Nesting bound for the defensive cycle guard.
///
/// Owned record trees cannot alias an ancestor, so a revisit can only
/// manifest as runaway depth from pathological generated input.
pub const MAX_DEPTH: usize = 64;

/// Builds a `NavigationContainer` from validated normalized records,
/// preserving input order (order is render order).
#[derive(Debug, Default)]
pub struct TreeBuilder {
    max_depth: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }

    /// Override the nesting bound. Zero is treated as unlimited.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Construct the page tree. Records are expected to have passed
    /// [`crate::source::validate_records`]; records with neither `uri` nor
    /// `route` become label-only branch nodes.
    pub fn build(&self, records: Vec<PageRecord>) -> NavResult<NavigationContainer> {
        let top_level = records.len();
        let pages = self.build_level(records, "pages", 1)?;
        debug!(top_level, "built navigation container");
        Ok(NavigationContainer::new(pages))
    }

    fn build_level(
        &self,
        records: Vec<PageRecord>,
        path: &str,
        depth: usize,
    ) -> NavResult<Vec<PageNode>> {
        if self.max_depth != 0 && depth > self.max_depth {
            return Err(NavigationError::CyclicStructure {
                path: path.to_string(),
                depth,
            });
        }

        records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let here = format!("{path}[{idx}]");
                let label = record.label.unwrap_or_default();
                let mut node = match (record.uri, record.route) {
                    (Some(uri), None) => PageNode::with_uri(label, uri),
                    (None, Some(route)) => PageNode::with_route(label, route),
                    (None, None) => PageNode::branch(label),
                    (Some(_), Some(_)) => {
                        // Validation rejects this; kept as a hard guard for
                        // callers building records by hand.
                        return Err(NavigationError::invalid(
                            here,
                            "both uri and route set; a link targets exactly one",
                        ));
                    }
                };
                for child in
                    self.build_level(record.pages, &format!("{here}.pages"), depth + 1)?
                {
                    node.push(child);
                }
                Ok(node)
            })
            .collect()
    }
}
