//! Navigation factory integration tests.
//!
//! End-to-end coverage of the build pipeline:
//! 1. Build containers from inline records, config values, and files
//! 2. Inject route components and verify every route-target page is bound
//! 3. Serve named containers through the registry with single-flight builds

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use serde_json::json;

use navtree::{
    AutoFileParser, ConstructedContainerFactory, ContainerFactory, ContainerRegistry,
    DefaultContainerFactory, NavResult, NavigationContainer, NavigationError,
    NavigationSource, PageRecord, RouteContext, RouteMatcher, RouteParams, RouteResolver,
    SourceResolver,
};

/// Fixed route match: controller=post, action=view, id=1337.
struct TestRouteMatch;

impl RouteMatcher for TestRouteMatch {
    fn params(&self) -> RouteParams {
        let mut params = RouteParams::new();
        params.insert("controller".to_string(), "post".to_string());
        params.insert("action".to_string(), "view".to_string());
        params.insert("id".to_string(), "1337".to_string());
        params
    }
}

/// Assembles `/{route}/{id}` from the matched parameters.
struct TestRouter;

impl RouteResolver for TestRouter {
    fn assemble(&self, route: &str, params: &RouteParams) -> NavResult<String> {
        match params.get("id") {
            Some(id) => Ok(format!("/{route}/{id}")),
            None => Ok(format!("/{route}")),
        }
    }
}

fn route_context() -> RouteContext {
    RouteContext::new(Arc::new(TestRouteMatch), Arc::new(TestRouter))
}

fn sample_records() -> Vec<PageRecord> {
    vec![
        PageRecord::uri("Page 1", "page1.html"),
        PageRecord::route("MVC Page", "foo")
            .with_pages(vec![PageRecord::route("Sub MVC Page", "foo")]),
        PageRecord::uri("Page 3", "page3.html"),
    ]
}

fn sample_config() -> serde_json::Value {
    json!([
        { "label": "Page 1", "uri": "page1.html" },
        { "label": "MVC Page", "route": "foo",
          "pages": [ { "label": "Sub MVC Page", "route": "foo" } ] },
        { "label": "Page 3", "uri": "page3.html" }
    ])
}

#[test]
fn default_factory_builds_three_pages() {
    let factory = DefaultContainerFactory::new(sample_config());
    let container = factory.create(&RouteContext::empty()).unwrap();
    assert_eq!(container.count(), 3);
    assert_eq!(
        container.labels(),
        vec!["Page 1", "MVC Page", "Sub MVC Page", "Page 3"]
    );
}

#[test]
fn mvc_pages_get_injected_with_components() {
    let factory = DefaultContainerFactory::new(sample_config());
    let container = factory.create(&route_context()).unwrap();

    for page in container.iter() {
        match page.label() {
            "MVC Page" | "Sub MVC Page" => {
                assert!(page.has_route_components(), "{} not bound", page.label());
                assert_eq!(page.href().unwrap(), Some("/foo/1337".to_string()));
            }
            _ => assert!(!page.has_route_components()),
        }
    }
}

#[test]
fn unresolved_route_read_fails_without_injection() {
    let factory = DefaultContainerFactory::new(sample_records());
    let container = factory.create(&RouteContext::empty()).unwrap();
    let mvc = container.find_by_label("MVC Page").unwrap();
    assert!(matches!(
        mvc.href(),
        Err(NavigationError::UnresolvedRoute { .. })
    ));
}

#[test]
fn constructed_from_records() {
    let factory = ConstructedContainerFactory::new(vec![
        PageRecord::uri("Page 1", "page1.html"),
        PageRecord::uri("Page 2", "page2.html"),
        PageRecord::uri("Page 3", "page3.html"),
    ]);
    let container = factory.create(&RouteContext::empty()).unwrap();
    assert_eq!(container.count(), 3);
}

#[test]
fn constructed_from_config() {
    let resolver = SourceResolver::new();
    let factory =
        ConstructedContainerFactory::from_source(sample_config(), &resolver).unwrap();
    let container = factory.create(&route_context()).unwrap();
    assert_eq!(container.count(), 3);
    let sub = container.find_by_label("Sub MVC Page").unwrap();
    assert!(sub.has_route_components());
}

#[test]
fn constructed_from_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("navigation.json");
    std::fs::write(&path, sample_config().to_string()).unwrap();

    let resolver = SourceResolver::with_parser(Arc::new(AutoFileParser));
    let factory = ConstructedContainerFactory::from_source(path, &resolver).unwrap();
    let container = factory.create(&RouteContext::empty()).unwrap();
    assert_eq!(container.count(), 3);
}

#[test]
fn file_source_without_parser_is_unsupported() {
    let factory = DefaultContainerFactory::new(NavigationSource::File(
        "navigation.xml".into(),
    ));
    let err = factory.create(&RouteContext::empty()).unwrap_err();
    assert!(matches!(err, NavigationError::UnsupportedFormat(_)));
}

#[test]
fn empty_input_yields_empty_container() {
    let factory = DefaultContainerFactory::new(Vec::<PageRecord>::new());
    let container = factory.create(&RouteContext::empty()).unwrap();
    assert_eq!(container.count(), 0);
}

#[test]
fn record_with_both_uri_and_route_is_rejected() {
    let factory = DefaultContainerFactory::new(json!([
        { "label": "Both", "uri": "both.html", "route": "both" }
    ]));
    let err = factory.create(&RouteContext::empty()).unwrap_err();
    assert!(matches!(err, NavigationError::InvalidSourceKind { .. }));
}

#[test]
fn inline_and_config_round_trip_agree() {
    let inline = DefaultContainerFactory::new(sample_records())
        .create(&route_context())
        .unwrap();
    let config = DefaultContainerFactory::new(sample_config())
        .create(&route_context())
        .unwrap();

    assert_eq!(inline.count(), config.count());
    assert_eq!(inline.labels(), config.labels());
}

/// Factory that counts invocations and takes long enough that concurrent
/// callers pile up behind the in-flight build.
struct SlowCountingFactory {
    calls: AtomicUsize,
}

impl ContainerFactory for SlowCountingFactory {
    fn create(&self, ctx: &RouteContext) -> NavResult<NavigationContainer> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(25));
        DefaultContainerFactory::new(sample_records()).create(ctx)
    }
}

#[test]
fn registry_builds_uncached_name_exactly_once() {
    const THREADS: usize = 8;

    let registry = Arc::new(ContainerRegistry::new());
    let factory = Arc::new(SlowCountingFactory {
        calls: AtomicUsize::new(0),
    });
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let factory = Arc::clone(&factory);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry
                    .get_or_build("default", &*factory, &RouteContext::empty())
                    .unwrap()
            })
        })
        .collect();

    let containers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
    for container in &containers {
        assert_eq!(container.count(), 3);
        assert!(Arc::ptr_eq(container, &containers[0]));
    }
}

#[test]
fn registry_serves_distinct_names_independently() {
    let registry = ContainerRegistry::new();
    let ctx = RouteContext::empty();

    let menu = DefaultContainerFactory::new(sample_records());
    let crumbs = DefaultContainerFactory::new(vec![PageRecord::uri("Home", "/")]);

    let a = registry.get_or_build("menu", &menu, &ctx).unwrap();
    let b = registry.get_or_build("breadcrumbs", &crumbs, &ctx).unwrap();
    assert_eq!(a.count(), 3);
    assert_eq!(b.count(), 1);
}
