//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::db::ScenarioStore;
use crate::scenarios::ScenarioService;

/// Application state shared across all handlers.
///
/// Generic over the store backend so the same router serves the production
/// `PostgreSQL` store and the in-memory store the test suites inject.
#[derive(Debug)]
pub struct AppState<S> {
    inner: Arc<AppStateInner<S>>,
}

#[derive(Debug)]
struct AppStateInner<S> {
    config: Config,
    service: ScenarioService<S>,
}

// Manual impl: `#[derive(Clone)]` would require `S: Clone`, but clones only
// copy the Arc.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ScenarioStore> AppState<S> {
    /// Build state from loaded configuration and an injected store handle.
    #[must_use]
    pub fn new(config: Config, store: S) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                service: ScenarioService::new(store),
            }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Scenario operations.
    #[must_use]
    pub fn service(&self) -> &ScenarioService<S> {
        &self.inner.service
    }
}
