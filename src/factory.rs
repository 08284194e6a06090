//! Container factories: the resolve → build → inject pipeline behind one
//! object-safe trait.
//!
//! Route components travel in an explicit [`RouteContext`] passed to
//! `create`, not reached through ambient global state. A context can be
//! empty; route-target pages then stay unresolved until someone injects
//! into them (and reading their link fails `UnresolvedRoute`).

use std::sync::Arc;

use tracing::debug;

use crate::builder::TreeBuilder;
use crate::container::NavigationContainer;
use crate::error::NavResult;
use crate::inject::{RouteComponentInjector, RouteMatcher, RouteResolver};
use crate::source::{NavigationSource, PageRecord, Resolved, SourceResolver};

/// Explicit bundle of route collaborators for a build.
#[derive(Clone, Default)]
pub struct RouteContext {
    matcher: Option<Arc<dyn RouteMatcher>>,
    resolver: Option<Arc<dyn RouteResolver>>,
}

impl RouteContext {
    /// Context with no route components; route pages stay unresolved.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(matcher: Arc<dyn RouteMatcher>, resolver: Arc<dyn RouteResolver>) -> Self {
        Self {
            matcher: Some(matcher),
            resolver: Some(resolver),
        }
    }

    /// Injector over this context, if both components are present.
    pub fn injector(&self) -> Option<RouteComponentInjector> {
        match (&self.matcher, &self.resolver) {
            (Some(matcher), Some(resolver)) => Some(RouteComponentInjector::new(
                Arc::clone(matcher),
                Arc::clone(resolver),
            )),
            _ => None,
        }
    }
}

/// Builds a navigation container on demand.
pub trait ContainerFactory: Send + Sync {
    fn create(&self, ctx: &RouteContext) -> NavResult<NavigationContainer>;
}

/// The standard pipeline: resolve the source, build the tree, inject route
/// components when the context carries them.
pub struct DefaultContainerFactory {
    source: NavigationSource,
    resolver: SourceResolver,
}

impl DefaultContainerFactory {
    pub fn new(source: impl Into<NavigationSource>) -> Self {
        Self {
            source: source.into(),
            resolver: SourceResolver::new(),
        }
    }

    /// Use a resolver with a declarative file parser installed.
    pub fn with_resolver(source: impl Into<NavigationSource>, resolver: SourceResolver) -> Self {
        Self {
            source: source.into(),
            resolver,
        }
    }
}

impl ContainerFactory for DefaultContainerFactory {
    fn create(&self, ctx: &RouteContext) -> NavResult<NavigationContainer> {
        match self.resolver.resolve(self.source.clone())? {
            Resolved::Records(records) => {
                let mut container = TreeBuilder::new().build(records)?;
                if let Some(injector) = ctx.injector() {
                    injector.inject(&mut container);
                }
                debug!(count = container.count(), "created navigation container");
                Ok(container)
            }
            Resolved::Delegated(factory) => factory.create(ctx),
        }
    }
}

enum ConstructedInner {
    Records(Vec<PageRecord>),
    Delegated(Arc<dyn ContainerFactory>),
}

/// Factory over a source resolved once, at construction time.
///
/// Mirrors the "constructed" flavor of the original factory surface: the
/// caller hands over inline records, a config value, or a file path up
/// front; normalization and its failures happen immediately, while tree
/// building and injection still run per `create` call.
pub struct ConstructedContainerFactory {
    inner: ConstructedInner,
}

impl ConstructedContainerFactory {
    /// Resolve `source` now; keeps only the normalized records (or the
    /// delegated factory, when the source already was one).
    pub fn from_source(
        source: impl Into<NavigationSource>,
        resolver: &SourceResolver,
    ) -> NavResult<Self> {
        let inner = match resolver.resolve(source.into())? {
            Resolved::Records(records) => ConstructedInner::Records(records),
            Resolved::Delegated(factory) => ConstructedInner::Delegated(factory),
        };
        Ok(Self { inner })
    }

    /// Wrap already-normalized records directly.
    pub fn new(records: Vec<PageRecord>) -> Self {
        Self {
            inner: ConstructedInner::Records(records),
        }
    }
}

impl ContainerFactory for ConstructedContainerFactory {
    fn create(&self, ctx: &RouteContext) -> NavResult<NavigationContainer> {
        match &self.inner {
            ConstructedInner::Records(records) => {
                let mut container = TreeBuilder::new().build(records.clone())?;
                if let Some(injector) = ctx.injector() {
                    injector.inject(&mut container);
                }
                Ok(container)
            }
            ConstructedInner::Delegated(factory) => factory.create(ctx),
        }
    }
}
