//! Shared, lock-guarded dashboard state.
//!
//! Every mutation goes through [`DashboardStore::dispatch`], which applies a
//! named [`DashboardAction`] under the write lock. Reads take a snapshot.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::dashboard::{DashboardAction, DashboardState};

/// Cloneable handle to the single dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    state: Arc<RwLock<DashboardState>>,
}

impl DashboardStore {
    pub fn new(model_version: impl Into<String>) -> Self {
        Self::from_state(DashboardState::new(model_version))
    }

    pub fn from_state(state: DashboardState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Applies `action` and returns the resulting state.
    pub async fn dispatch(&self, action: DashboardAction) -> DashboardState {
        let name = action.name();
        let mut state = self.state.write().await;
        state.apply(action);
        debug!(action = name, "dashboard action applied");
        state.clone()
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Reads one part of the state without cloning the rest.
    pub async fn read<T>(&self, f: impl FnOnce(&DashboardState) -> T) -> T {
        f(&*self.state.read().await)
    }
}
