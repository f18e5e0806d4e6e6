// src/state.rs

use axum::extract::FromRef;

use crate::{config::Config, generator::SharedGenerator, storage::SharedStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// `None` when no AI provider is configured; generation then uses the catalog.
    pub generator: Option<SharedGenerator>,
    pub config: Config,
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
