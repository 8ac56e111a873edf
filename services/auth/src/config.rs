use std::time::Duration;

use serde::Deserialize;

use flocky_core::config::Config;

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,
    /// Comma-separated browser origins allowed by CORS. Env var: `CORS_ALLOWED_ORIGINS`.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
    /// Seconds between expired-session sweeps; `0` disables the sweeper.
    /// Env var: `SESSION_SWEEP_INTERVAL_SECS`.
    #[serde(default = "default_session_sweep_interval_secs")]
    pub session_sweep_interval_secs: u64,
    /// Record the first `X-Forwarded-For` hop as the session IP. Enable only
    /// behind a proxy that overwrites the header. Env var: `TRUST_FORWARDED_FOR`.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

fn default_auth_port() -> u16 {
    3112
}

fn default_cors_allowed_origins() -> String {
    "http://localhost:5173".to_owned()
}

fn default_session_sweep_interval_secs() -> u64 {
    3600
}

impl Config for AuthConfig {}

impl AuthConfig {
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn session_sweep_interval(&self) -> Option<Duration> {
        (self.session_sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.session_sweep_interval_secs))
    }
}
