use std::path::PathBuf;

/// Seed demo account credentials.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub email: String,
    pub password: String,
}

/// Simulated network round-trip durations, in milliseconds.
#[derive(Debug, Clone)]
pub struct LatencyConfig {
    pub auth_ms: u64,
    pub logout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// When set, records persist to this JSON file; otherwise in memory.
    pub store_path: Option<PathBuf>,
    pub demo: DemoConfig,
    pub latency: LatencyConfig,
}

impl AppConfig {
    /// Every knob has a default, so a bare environment works.
    pub fn from_env() -> Self {
        let demo = DemoConfig {
            email: std::env::var("AUTHKIT_DEMO_EMAIL")
                .unwrap_or_else(|_| "demo@example.com".into()),
            password: std::env::var("AUTHKIT_DEMO_PASSWORD")
                .unwrap_or_else(|_| "password123".into()),
        };
        let latency = LatencyConfig {
            auth_ms: std::env::var("AUTHKIT_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(700),
            logout_ms: std::env::var("AUTHKIT_LOGOUT_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(500),
        };
        let store_path = std::env::var("AUTHKIT_STORE_PATH").ok().map(PathBuf::from);

        Self {
            store_path,
            demo,
            latency,
        }
    }
}
