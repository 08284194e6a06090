//! Configuration-driven hierarchical navigation containers.
//!
//! Builds page-navigation trees (menus, breadcrumbs) from heterogeneous
//! configuration sources and binds external route components into the pages
//! that target named application routes.
//!
//! The pipeline: a [`SourceResolver`] normalizes inline records, structured
//! config values, or declarative files into one canonical record shape; the
//! [`TreeBuilder`] constructs the page tree; a [`RouteComponentInjector`]
//! attaches the caller's route matcher/resolver to route-target pages; and
//! the [`ContainerRegistry`] caches named containers with single-flight
//! builds.
//!
//! ```
//! use navtree::{ContainerFactory, DefaultContainerFactory, PageRecord, RouteContext};
//!
//! let factory = DefaultContainerFactory::new(vec![
//!     PageRecord::uri("Home", "index.html"),
//!     PageRecord::route("Account", "account"),
//! ]);
//! let container = factory.create(&RouteContext::empty()).unwrap();
//! assert_eq!(container.count(), 2);
//! ```

pub mod builder;
pub mod container;
pub mod error;
pub mod factory;
pub mod inject;
pub mod loader;
pub mod page;
pub mod registry;
pub mod source;

pub use builder::TreeBuilder;
pub use container::NavigationContainer;
pub use error::{NavResult, NavigationError};
pub use factory::{
    ConstructedContainerFactory, ContainerFactory, DefaultContainerFactory, RouteContext,
};
pub use inject::{RouteComponentInjector, RouteMatcher, RouteParams, RouteResolver};
pub use loader::{AutoFileParser, JsonFileParser, YamlFileParser};
pub use page::{LinkTarget, PageNode, RouteBinding};
pub use registry::ContainerRegistry;
pub use source::{DeclarativeFileParser, NavigationSource, PageRecord, SourceResolver};
