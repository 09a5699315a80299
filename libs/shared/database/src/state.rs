use std::sync::Arc;

use axum::extract::FromRef;
use tracing::info;

use shared_config::{AppConfig, StoreBackend};

use crate::memory::InMemoryStore;
use crate::store::{AccountStore, AppointmentStore};
use crate::supabase::SupabaseStore;

/// Shared router state: configuration plus the two collections.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
    pub appointments: Arc<dyn AppointmentStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        accounts: Arc<dyn AccountStore>,
        appointments: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            accounts,
            appointments,
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(config, store.clone(), store)
    }

    pub fn from_config(config: AppConfig) -> Self {
        match config.store_backend {
            StoreBackend::Memory => {
                info!("Using in-memory document store");
                Self::in_memory(config)
            }
            StoreBackend::Supabase => {
                info!("Using Supabase store at {}", config.supabase_url);
                let store = Arc::new(SupabaseStore::new(&config));
                Self::new(config, store.clone(), store)
            }
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
