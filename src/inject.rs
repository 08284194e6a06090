//! Route component traits and the tree-walking injector.
//!
//! The routing engine itself is an external collaborator. This module defines
//! the two capabilities the core consumes — the current route match and the
//! route-to-path assembler — and the injector that binds them into every
//! route-target node of a built container.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::container::NavigationContainer;
use crate::error::NavResult;
use crate::page::{LinkTarget, PageNode, RouteBinding};

/// Parameters extracted from the currently matched route.
pub type RouteParams = HashMap<String, String>;

/// Capability exposing the parameters of the currently matched route.
///
/// Opaque to the core: only the parameter map is consumed, and only when a
/// route-bound node's effective link is read.
pub trait RouteMatcher: Send + Sync {
    /// Parameters of the current match (e.g. controller/action/id).
    fn params(&self) -> RouteParams;
}

/// Capability assembling a concrete path for a named route.
pub trait RouteResolver: Send + Sync {
    /// Build a URL/path for `route` using the given parameters.
    fn assemble(&self, route: &str, params: &RouteParams) -> NavResult<String>;
}

/// Binds route components into every route-target node of a container.
///
/// Traversal is depth-first pre-order and visits all descendants regardless
/// of whether the current node is route-bound — children can independently
/// carry route targets. Re-injection overwrites prior bindings rather than
/// erroring, so calling `inject` twice is observably identical to once.
pub struct RouteComponentInjector {
    matcher: Arc<dyn RouteMatcher>,
    resolver: Arc<dyn RouteResolver>,
}

impl RouteComponentInjector {
    pub fn new(matcher: Arc<dyn RouteMatcher>, resolver: Arc<dyn RouteResolver>) -> Self {
        Self { matcher, resolver }
    }

    /// Walk the container and bind components into each route-target node.
    pub fn inject(&self, container: &mut NavigationContainer) {
        let mut bound = 0usize;
        for page in container.pages_mut() {
            self.inject_node(page, &mut bound);
        }
        debug!(bound, "injected route components");
    }

    fn inject_node(&self, node: &mut PageNode, bound: &mut usize) {
        if let Some(LinkTarget::Route { binding, .. }) = node.target_mut() {
            *binding = RouteBinding::Bound {
                matcher: Arc::clone(&self.matcher),
                resolver: Arc::clone(&self.resolver),
            };
            *bound += 1;
        }
        for child in node.pages_mut() {
            self.inject_node(child, bound);
        }
    }
}
