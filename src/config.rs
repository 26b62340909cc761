//! Configuration and paths

use std::path::PathBuf;

/// All configurable paths and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub profile_dir: PathBuf,
    pub timeout_secs: u64,
    pub release_url: String,
    pub current_version: String,
    pub cargo: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .expect("Could not find home directory")
                    .join(".config")
            });

        let home = dirs::home_dir().expect("Could not find home directory");

        Self {
            config_path: base.join("whatsapp/config.json"),
            profile_dir: home.join(".whatsapp-web"),
            timeout_secs: 120,
            release_url: RELEASE_URL.to_string(),
            current_version: env!("CARGO_PKG_VERSION").to_string(),
            cargo: home.join(".cargo/bin/cargo"),
        }
    }
}

impl Config {
    /// Create config for testing with custom paths
    pub fn for_test(temp_dir: &std::path::Path) -> Self {
        Self {
            config_path: temp_dir.join("whatsapp/config.json"),
            profile_dir: temp_dir.join("profile"),
            timeout_secs: 5,
            release_url: "http://127.0.0.1:0/releases/latest".to_string(),
            current_version: "0.0.0".to_string(),
            cargo: PathBuf::from("/usr/bin/false"),
        }
    }
}

/// Latest-release metadata endpoint
pub const RELEASE_URL: &str = "https://api.github.com/repos/wasend/wasend/releases/latest";

/// Delay between readiness probes
pub const POLL_INTERVAL_MS: u64 = 800;

/// Minimum gap between "still waiting" heartbeat notices
pub const HEARTBEAT_INTERVAL_SECS: u64 = 10;

/// Grace period after submit before the browser is closed
pub const SETTLE_DELAY_MS: u64 = 1500;

/// Navigation deadline for the initial page load
pub const NAVIGATION_TIMEOUT_SECS: u64 = 60;

/// Current-version placeholder when the build carries no version
pub const UNKNOWN_VERSION: &str = "unknown";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.config_path.to_string_lossy().contains("config.json"));
        assert!(config.profile_dir.to_string_lossy().contains(".whatsapp-web"));
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_test_config() {
        let temp = std::env::temp_dir();
        let config = Config::for_test(&temp);
        assert!(config.config_path.starts_with(&temp));
        assert_eq!(config.current_version, "0.0.0");
    }

    #[test]
    fn test_intervals() {
        // Heartbeats must be much rarer than probes
        assert!(HEARTBEAT_INTERVAL_SECS * 1000 > POLL_INTERVAL_MS * 10);
    }

    #[test]
    fn test_current_version_is_not_sentinel() {
        let config = Config::default();
        assert_ne!(config.current_version, UNKNOWN_VERSION);
    }
}
