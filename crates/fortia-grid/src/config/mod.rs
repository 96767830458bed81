use std::env;
use std::fmt;
use std::time::Duration;

use crate::grid::mount::MountPolicy;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the grid hosts.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub grid: GridConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let search_debounce_ms = number_var("GRID_SEARCH_DEBOUNCE_MS", 300)?;
        let mount_max_attempts = number_var("GRID_MOUNT_MAX_ATTEMPTS", 50)?;
        let mount_interval_ms = number_var("GRID_MOUNT_INTERVAL_MS", 100)?;

        Ok(Self {
            environment,
            grid: GridConfig {
                search_debounce_ms,
                mount_max_attempts: u32::try_from(mount_max_attempts).map_err(|_| {
                    ConfigError::InvalidNumber {
                        key: "GRID_MOUNT_MAX_ATTEMPTS",
                        value: mount_max_attempts.to_string(),
                    }
                })?,
                mount_interval_ms,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn number_var(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        Err(_) => Ok(default),
    }
}

/// Timing knobs for the table controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub search_debounce_ms: u64,
    pub mount_max_attempts: u32,
    pub mount_interval_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            mount_max_attempts: 50,
            mount_interval_ms: 100,
        }
    }
}

impl GridConfig {
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn mount_policy(&self) -> MountPolicy {
        MountPolicy {
            max_attempts: self.mount_max_attempts,
            interval: Duration::from_millis(self.mount_interval_ms),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("GRID_SEARCH_DEBOUNCE_MS");
        env::remove_var("GRID_MOUNT_MAX_ATTEMPTS");
        env::remove_var("GRID_MOUNT_INTERVAL_MS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(config.grid.search_delay(), Duration::from_millis(300));
        assert_eq!(config.grid.mount_policy(), MountPolicy::default());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_grid_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("GRID_SEARCH_DEBOUNCE_MS", "150");
        env::set_var("GRID_MOUNT_MAX_ATTEMPTS", "3");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.grid.search_delay(), Duration::from_millis(150));
        assert_eq!(config.grid.mount_policy().max_attempts, 3);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GRID_SEARCH_DEBOUNCE_MS", "soon");
        let error = AppConfig::load().expect_err("invalid delay");
        reset_env();

        assert_eq!(
            error.to_string(),
            "GRID_SEARCH_DEBOUNCE_MS must be a non-negative integer, got 'soon'"
        );
    }
}
