//! Command line / environment configuration.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::{ClientConfig, DEFAULT_API_URL, DEFAULT_MAX_AGE_SECS};
use crate::error::{Result, simple_error};

#[derive(Debug, Parser)]
#[command(name = "userdeck", version, about = "Browse users from a REST directory API")]
pub struct Cli {
    /// Base URL of the users API.
    #[arg(long, env = "USERDECK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Seconds a fetched response may be reused before re-fetching (0 disables caching).
    #[arg(long, env = "USERDECK_MAX_AGE", default_value_t = DEFAULT_MAX_AGE_SECS)]
    pub max_age: u64,

    /// Request timeout in seconds.
    #[arg(long, env = "USERDECK_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Theme file; created with defaults if missing.
    #[arg(long, env = "USERDECK_THEME")]
    pub theme: Option<PathBuf>,

    /// Keybindings file; created with defaults if missing.
    #[arg(long, env = "USERDECK_KEYBINDS")]
    pub keybinds: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level).
    #[arg(long, env = "USERDECK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn client_config(&self) -> Result<ClientConfig> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(simple_error(format!(
                "api url must start with http:// or https://, got '{url}'"
            )));
        }
        Ok(ClientConfig {
            base_url: url.to_string(),
            max_age: Duration::from_secs(self.max_age),
            timeout: Duration::from_secs(self.timeout.max(1)),
        })
    }
}

/// Directories searched for config files, most specific first.
pub fn config_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(xdg).join("userdeck"));
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(home).join(".config").join("userdeck"));
    }
    dirs
}

/// First existing `name` under [`config_dirs`].
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    config_dirs().into_iter().map(|d| d.join(name)).find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_api() {
        let cli = Cli::parse_from(["userdeck"]);
        let cfg = cli.client_config().unwrap();
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
        assert_eq!(cfg.max_age, Duration::from_secs(3600));
    }

    #[test]
    fn rejects_non_http_base() {
        let cli = Cli::parse_from(["userdeck", "--api-url", "ftp://example.com"]);
        assert!(cli.client_config().is_err());
    }
}
