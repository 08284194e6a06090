//! Named-instance registry with single-flight builds.
//!
//! Each logical navigation name moves through absent → building → ready.
//! The absent → building transition is atomic with respect to concurrent
//! callers: exactly one factory runs per name, everyone else awaits the
//! in-flight build. A failed build returns the entry to absent, so a later
//! caller can retry. Ready entries are cached for the registry's lifetime
//! unless explicitly invalidated.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use tracing::debug;

use crate::container::NavigationContainer;
use crate::error::NavResult;
use crate::factory::{ContainerFactory, RouteContext};

enum EntryState {
    /// A build is in flight; await `build_done`.
    Building,
    /// Built and cached.
    Ready(Arc<NavigationContainer>),
}

/// Cache of named navigation containers with per-name single-flight builds.
#[derive(Default)]
pub struct ContainerRegistry {
    entries: Mutex<HashMap<String, EntryState>>,
    overrides: Mutex<HashMap<String, Arc<dyn ContainerFactory>>>,
    build_done: Condvar,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the named container, building it through `factory` on a miss.
    ///
    /// If a factory override is registered for `name` (see [`set_factory`]),
    /// it is used instead of `factory`. Concurrent callers for the same
    /// uncached name block until the one in-flight build completes; its
    /// result (or retry eligibility, on failure) is shared.
    ///
    /// [`set_factory`]: ContainerRegistry::set_factory
    pub fn get_or_build(
        &self,
        name: &str,
        factory: &dyn ContainerFactory,
        ctx: &RouteContext,
    ) -> NavResult<Arc<NavigationContainer>> {
        let mut entries = self.entries.lock().unwrap();
        loop {
            match entries.get(name) {
                Some(EntryState::Ready(container)) => {
                    debug!(name, "navigation cache hit");
                    return Ok(Arc::clone(container));
                }
                Some(EntryState::Building) => {
                    entries = self.build_done.wait(entries).unwrap();
                }
                None => {
                    entries.insert(name.to_string(), EntryState::Building);
                    break;
                }
            }
        }
        drop(entries);

        debug!(name, "building navigation container");
        let chosen = self.overrides.lock().unwrap().get(name).cloned();
        let result = match &chosen {
            Some(factory) => factory.create(ctx),
            None => factory.create(ctx),
        };

        let mut entries = self.entries.lock().unwrap();
        let outcome = match result {
            Ok(container) => {
                let container = Arc::new(container);
                entries.insert(name.to_string(), EntryState::Ready(Arc::clone(&container)));
                Ok(container)
            }
            Err(err) => {
                // Failed build leaves the entry absent, eligible for retry.
                entries.remove(name);
                Err(err)
            }
        };
        drop(entries);
        self.build_done.notify_all();
        outcome
    }

    /// Return the cached container for `name` without building.
    pub fn get(&self, name: &str) -> Option<Arc<NavigationContainer>> {
        match self.entries.lock().unwrap().get(name) {
            Some(EntryState::Ready(container)) => Some(Arc::clone(container)),
            _ => None,
        }
    }

    /// Seed a ready container directly (test substitution).
    pub fn insert(&self, name: impl Into<String>, container: NavigationContainer) {
        self.entries
            .lock()
            .unwrap()
            .insert(name.into(), EntryState::Ready(Arc::new(container)));
    }

    /// Register a factory override for `name`.
    ///
    /// The override wins over whatever factory later `get_or_build` calls
    /// pass in. Overriding a name that is already ready invalidates the
    /// cached instance: the entry returns to absent and the next fetch
    /// rebuilds through the override.
    pub fn set_factory(&self, name: impl Into<String>, factory: Arc<dyn ContainerFactory>) {
        let name = name.into();
        self.overrides
            .lock()
            .unwrap()
            .insert(name.clone(), factory);
        self.entries.lock().unwrap().remove(&name);
    }

    /// Drop the cached instance for `name`, if any.
    pub fn invalidate(&self, name: &str) {
        self.entries.lock().unwrap().remove(name);
    }

    /// Clear all cached instances and overrides (test isolation).
    pub fn reset(&self) {
        self.entries.lock().unwrap().clear();
        self.overrides.lock().unwrap().clear();
    }
}
