//! Configuration management with environment variable support.
//!
//! This module provides centralized configuration for the harness, supporting:
//! - Environment variables for all configurable values
//! - Sensible defaults that match the hosted test application
//! - Command-line overrides layered on top by the binary
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH_HARNESS_WEBDRIVER_URL` | WebDriver endpoint URL | `http://localhost:4444` |
//! | `AUTH_HARNESS_BASE_URL` | Base URL of the application under test | `https://ai-meeting-notes-ebon.vercel.app` |
//! | `AUTH_HARNESS_WAIT_TIMEOUT` | Bounded element wait in seconds | `10` |
//! | `AUTH_HARNESS_SCREENSHOT_DIR` | Root directory for screenshot output | `screenshots` |
//! | `AUTH_HARNESS_LOG_FILE` | Log file, truncated each run | `e2e_harness.log` |
//! | `AUTH_HARNESS_DATA_DIR` | Directory holding credential CSV files | `test_data` |

use std::env;
use std::sync::OnceLock;

// ============================================================================
// Default Values
// ============================================================================

/// Default WebDriver endpoint
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Default base URL of the application under test
pub const DEFAULT_BASE_URL: &str = "https://ai-meeting-notes-ebon.vercel.app";

/// Default bounded wait for element presence (seconds)
pub const DEFAULT_WAIT_TIMEOUT: u64 = 10;

/// Default root directory for screenshot output
pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "e2e_harness.log";

/// Default directory for credential CSV files
pub const DEFAULT_DATA_DIR: &str = "test_data";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the WebDriver endpoint
pub const ENV_WEBDRIVER_URL: &str = "AUTH_HARNESS_WEBDRIVER_URL";

/// Environment variable for the application base URL
pub const ENV_BASE_URL: &str = "AUTH_HARNESS_BASE_URL";

/// Environment variable for the element wait timeout (seconds)
pub const ENV_WAIT_TIMEOUT: &str = "AUTH_HARNESS_WAIT_TIMEOUT";

/// Environment variable for the screenshot root directory
pub const ENV_SCREENSHOT_DIR: &str = "AUTH_HARNESS_SCREENSHOT_DIR";

/// Environment variable for the log file path
pub const ENV_LOG_FILE: &str = "AUTH_HARNESS_LOG_FILE";

/// Environment variable for the credential data directory
pub const ENV_DATA_DIR: &str = "AUTH_HARNESS_DATA_DIR";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for the harness
#[derive(Debug, Clone)]
pub struct Config {
    /// Browser/WebDriver configuration
    pub browser: BrowserSettings,
    /// Output locations
    pub output: OutputSettings,
}

/// Browser and target-application settings
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// WebDriver endpoint URL
    pub webdriver_url: String,
    /// Base URL of the application under test
    pub base_url: String,
    /// Bounded wait for element presence (seconds)
    pub wait_timeout: u64,
}

/// Output location settings
#[derive(Debug, Clone)]
pub struct OutputSettings {
    /// Root directory for screenshot output
    pub screenshot_dir: String,
    /// Log file path, truncated each run
    pub log_file: String,
    /// Directory holding credential CSV files
    pub data_dir: String,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            browser: BrowserSettings::from_env(),
            output: OutputSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            browser: BrowserSettings::defaults(),
            output: OutputSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl BrowserSettings {
    /// Create browser settings from environment variables
    pub fn from_env() -> Self {
        Self {
            webdriver_url: env::var(ENV_WEBDRIVER_URL)
                .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string()),
            base_url: env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            wait_timeout: env::var(ENV_WAIT_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_WAIT_TIMEOUT),
        }
    }

    /// Create browser settings with defaults
    pub fn defaults() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

impl OutputSettings {
    /// Create output settings from environment variables
    pub fn from_env() -> Self {
        Self {
            screenshot_dir: env::var(ENV_SCREENSHOT_DIR)
                .unwrap_or_else(|_| DEFAULT_SCREENSHOT_DIR.to_string()),
            log_file: env::var(ENV_LOG_FILE).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
            data_dir: env::var(ENV_DATA_DIR).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
        }
    }

    /// Create output settings with defaults
    pub fn defaults() -> Self {
        Self {
            screenshot_dir: DEFAULT_SCREENSHOT_DIR.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

/// Get the WebDriver endpoint (convenience function)
pub fn webdriver_url() -> String {
    get().browser.webdriver_url.clone()
}

/// Get the application base URL (convenience function)
pub fn base_url() -> String {
    get().browser.base_url.clone()
}

/// Get the bounded wait timeout in seconds (convenience function)
pub fn wait_timeout() -> u64 {
    get().browser.wait_timeout
}

/// Get the screenshot root directory (convenience function)
pub fn screenshot_dir() -> String {
    get().output.screenshot_dir.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert_eq!(config.browser.webdriver_url, DEFAULT_WEBDRIVER_URL);
        assert_eq!(config.browser.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.browser.wait_timeout, DEFAULT_WAIT_TIMEOUT);
        assert_eq!(config.output.screenshot_dir, DEFAULT_SCREENSHOT_DIR);
        assert_eq!(config.output.log_file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_browser_settings_defaults_match_consts() {
        let settings = BrowserSettings::defaults();
        assert_eq!(settings.wait_timeout, 10);
        assert!(settings.base_url.starts_with("https://"));
    }
}
