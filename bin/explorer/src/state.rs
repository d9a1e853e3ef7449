//! Shared reactive state.

use leptos::prelude::*;
use std::future::Future;

/// The tab-wide loading/connectivity flag.
///
/// Created once by the root component and passed explicitly to the
/// components that read it (the navigation bar) or write it (pages that call
/// the backend).
#[derive(Debug, Clone, Copy)]
pub struct LoadingState(RwSignal<bool>);

impl LoadingState {
    /// Creates the flag, initially not loading.
    pub fn new() -> Self {
        Self(RwSignal::new(false))
    }

    /// Returns the current value, tracking it in reactive contexts.
    pub fn is_loading(&self) -> bool {
        self.0.get()
    }

    /// Sets the flag.
    pub fn set_loading(&self, loading: bool) {
        self.0.set(loading);
    }

    /// Read-only view for presentational components.
    pub fn signal(&self) -> Signal<bool> {
        self.0.into()
    }

    /// Marks the flag as loading while `fut` runs.
    pub async fn track<F: Future>(self, fut: F) -> F::Output {
        self.set_loading(true);
        let output = fut.await;
        self.set_loading(false);
        output
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}
