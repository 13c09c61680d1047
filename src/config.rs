//! Configuration - CLI flags with environment fallbacks (`.env` is loaded first)

use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_PORT: u16 = 8099;

/// Log file used while the terminal dashboard owns stdout
pub const TUI_LOG_FILE: &str = "ergotracker.log";

/// Server settings
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite database file (directory is created if missing)
    #[arg(long, env = "DATABASE_PATH", default_value = "data/ergotracker.db")]
    pub database_path: PathBuf,

    /// Pre-built web UI served when present
    #[arg(long, env = "DIST_DIR", default_value = "dist")]
    pub dist_dir: PathBuf,

    /// Path prefix for API routes
    #[arg(long, env = "API_BASE_PATH", default_value = "/api")]
    pub base_path: String,
}

/// Client settings
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the API, including its path prefix
    #[arg(long, env = "ERGOTRACKER_API_URL", default_value = "http://127.0.0.1:8099/api")]
    pub api_url: String,

    /// Directory holding the device identity file
    #[arg(long, env = "ERGOTRACKER_STATE_DIR", default_value = ".ergotracker")]
    pub state_dir: PathBuf,
}

impl ClientConfig {
    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join(TUI_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_inside_state_dir() {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:8099/api".to_string(),
            state_dir: PathBuf::from("/tmp/ergo-state"),
        };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/ergo-state/ergotracker.log"));
    }
}
