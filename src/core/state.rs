use std::sync::Arc;

use crate::core::config::Settings;
use crate::store::Store;

/// Shared handle over the configuration and the storage collaborator.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<dyn Store>) -> Self {
        Self { inner: Arc::new(InnerState { settings, store }) }
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }
}
