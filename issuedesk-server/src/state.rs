//! Application state shared across handlers

use std::sync::Arc;

use crate::db::IssueStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn IssueStore>,
}

impl AppState {
    pub fn new(store: impl IssueStore + 'static) -> Self {
        Self::from_store(Arc::new(store))
    }

    /// Share a store that is also held elsewhere (tests inspect it directly).
    pub fn from_store(store: Arc<dyn IssueStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> &dyn IssueStore {
        self.inner.store.as_ref()
    }
}
