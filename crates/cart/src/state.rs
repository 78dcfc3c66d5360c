//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::CartStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart store sits behind a mutex so each
/// cart operation is atomic with respect to the others even on a
/// multithreaded runtime - the whole read-modify-write happens under one
/// lock acquisition.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    store: Mutex<CartStore>,
}

impl AppState {
    /// Create state with a fresh, empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared cart store.
    #[must_use]
    pub fn store(&self) -> &Mutex<CartStore> {
        &self.inner.store
    }
}
