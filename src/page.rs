//! Page nodes: the building blocks of a navigation tree.
//!
//! A page is a labelled node with an optional link target and an owned,
//! ordered sequence of child pages. Route-target pages go through a two-phase
//! lifecycle: constructed `Unresolved`, then `Bound` once the injector
//! attaches route components. Reading the effective link of an unresolved
//! route page is an explicit `UnresolvedRoute` failure, never a silent null.

use std::fmt;
use std::sync::Arc;

use crate::error::{NavResult, NavigationError};
use crate::inject::{RouteMatcher, RouteResolver};

/// Where a page links to. A page without a target is a label-only branch
/// node (a grouping entry that renders but does not link anywhere).
#[derive(Clone)]
pub enum LinkTarget {
    /// Literal URI, used verbatim as the effective link.
    Uri(String),
    /// Named application route; needs injected components to produce a path.
    Route {
        name: String,
        binding: RouteBinding,
    },
}

/// Injection state of a route-target page.
#[derive(Clone, Default)]
pub enum RouteBinding {
    /// Constructed but not yet injected.
    #[default]
    Unresolved,
    /// Route components attached. The page does not own their lifetime;
    /// they are shared references into the caller's routing engine.
    Bound {
        matcher: Arc<dyn RouteMatcher>,
        resolver: Arc<dyn RouteResolver>,
    },
}

/// One node of the navigation tree.
#[derive(Clone)]
pub struct PageNode {
    label: String,
    target: Option<LinkTarget>,
    pages: Vec<PageNode>,
}

impl PageNode {
    /// Create a label-only branch node.
    pub fn branch(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
            pages: Vec::new(),
        }
    }

    /// Create a page linking to a literal URI.
    pub fn with_uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Some(LinkTarget::Uri(uri.into())),
            pages: Vec::new(),
        }
    }

    /// Create a page targeting a named route, initially unresolved.
    pub fn with_route(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Some(LinkTarget::Route {
                name: route.into(),
                binding: RouteBinding::Unresolved,
            }),
            pages: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> Option<&LinkTarget> {
        self.target.as_ref()
    }

    pub(crate) fn target_mut(&mut self) -> Option<&mut LinkTarget> {
        self.target.as_mut()
    }

    /// Child pages in render order.
    pub fn pages(&self) -> &[PageNode] {
        &self.pages
    }

    pub(crate) fn pages_mut(&mut self) -> &mut [PageNode] {
        &mut self.pages
    }

    /// Append a child page, preserving insertion order.
    pub fn push(&mut self, page: PageNode) {
        self.pages.push(page);
    }

    /// True if this page targets a named route (bound or not).
    pub fn is_route_target(&self) -> bool {
        matches!(self.target, Some(LinkTarget::Route { .. }))
    }

    /// True if this page is a route target with components injected.
    pub fn has_route_components(&self) -> bool {
        matches!(
            self.target,
            Some(LinkTarget::Route {
                binding: RouteBinding::Bound { .. },
                ..
            })
        )
    }

    /// Resolve the effective link of this page.
    ///
    /// - `Ok(Some(uri))` for a literal URI page;
    /// - `Ok(None)` for a label-only branch node;
    /// - assembled path for a bound route page;
    /// - `Err(UnresolvedRoute)` for a route page read before injection.
    pub fn href(&self) -> NavResult<Option<String>> {
        match &self.target {
            None => Ok(None),
            Some(LinkTarget::Uri(uri)) => Ok(Some(uri.clone())),
            Some(LinkTarget::Route { name, binding }) => match binding {
                RouteBinding::Unresolved => Err(NavigationError::UnresolvedRoute {
                    label: self.label.clone(),
                    route: name.clone(),
                }),
                RouteBinding::Bound { matcher, resolver } => {
                    let path = resolver.assemble(name, &matcher.params())?;
                    Ok(Some(path))
                }
            },
        }
    }
}

impl fmt::Debug for PageNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            None => "none".to_string(),
            Some(LinkTarget::Uri(uri)) => format!("uri:{uri}"),
            Some(LinkTarget::Route { name, binding }) => {
                let state = match binding {
                    RouteBinding::Unresolved => "unresolved",
                    RouteBinding::Bound { .. } => "bound",
                };
                format!("route:{name}({state})")
            }
        };
        f.debug_struct("PageNode")
            .field("label", &self.label)
            .field("target", &target)
            .field("pages", &self.pages)
            .finish()
    }
}
