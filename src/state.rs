use crate::{config::Config, services::TestResultService, store::Store};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
}

impl FromRef<AppState> for TestResultService {
    fn from_ref(state: &AppState) -> Self {
        TestResultService::new(state.store.clone())
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
