//! Error taxonomy for the navigation build pipeline.
//!
//! Every failure in resolve/build/inject/registry surfaces as one of these
//! variants, immediately and with enough positional context to locate the
//! offending record. Nothing is swallowed or retried.

use thiserror::Error;

/// Result type for navigation operations
pub type NavResult<T> = Result<T, NavigationError>;

/// Errors raised while resolving sources, building trees, injecting route
/// components, or serving containers from the registry.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The input had a recognizable shape but a malformed record.
    ///
    /// `path` is a bracketed positional path into the normalized structure,
    /// e.g. `pages[1].pages[0]`, pointing at the record that failed.
    #[error("invalid source at {path}: {reason}")]
    InvalidSourceKind { path: String, reason: String },

    /// A source kind was supplied that no configured collaborator can
    /// handle (e.g. a file path with no declarative parser installed).
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),

    /// The normalized structure exceeded the nesting bound, which for an
    /// owned tree can only happen with pathological generated input.
    #[error("cyclic structure detected at {path} (depth {depth})")]
    CyclicStructure { path: String, depth: usize },

    /// A route-bound page's effective link was read before route
    /// components were injected into it.
    #[error("route '{route}' on page '{label}' read before injection")]
    UnresolvedRoute { label: String, route: String },

    /// A declarative file parser failed; `path` names the file.
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },
}

impl NavigationError {
    /// Convenience constructor for `InvalidSourceKind`.
    pub fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSourceKind {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
