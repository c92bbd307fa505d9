use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::{AppConfig, DemoConfig, LatencyConfig};
use crate::storage::{CredentialStore, FileStore, MemoryStore};

/// Composition root. Owns the store handle and the explicitly constructed
/// service.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CredentialStore>,
    pub auth: AuthService,
}

impl AppState {
    /// Reads configuration from the environment and wires everything up.
    /// A configured store path selects the file-backed store.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env());
        let store: Arc<dyn CredentialStore> = match &config.store_path {
            Some(path) => Arc::new(FileStore::open(path).await?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::from_parts(config, store)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn CredentialStore>,
    ) -> anyhow::Result<Self> {
        let auth = AuthService::new(store.clone(), config.clone())?;
        Ok(Self {
            config,
            store,
            auth,
        })
    }

    /// Zero-latency, memory-backed state for tests.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            store_path: None,
            demo: DemoConfig {
                email: "demo@example.com".into(),
                password: "password123".into(),
            },
            latency: LatencyConfig {
                auth_ms: 0,
                logout_ms: 0,
            },
        });
        let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
        Self::from_parts(config, store).expect("seed account hash")
    }
}
