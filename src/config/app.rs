//! Check configuration for the `waitfor-http` binary.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::validation::{ConfigError, expand_env_vars};

// =============================================================================
// Constants
// =============================================================================

/// Default time allowed for one readiness check (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

// =============================================================================
// Check Configuration
// =============================================================================

/// One-shot readiness check settings.
///
/// ```yaml
/// url: "http://${API_HOST:-localhost}:8080/healthz"
/// timeout: 5s
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Target URL. `${VAR}` and `${VAR:-default}` are expanded on load.
    #[serde(default)]
    pub url: Option<String>,

    /// Upper bound for the whole check (default: 10s).
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CheckConfig {
    /// Load configuration from a YAML file.
    ///
    /// Validation is left to the caller so that command line overrides can
    /// fill in missing values first.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.url = config.url.map(|url| expand_env_vars(&url));
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.url.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(ConfigError::ValidationError(
                    "url is required".to_string(),
                ));
            }
            Some(_) => {}
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_check_config_default() {
        let config = CheckConfig::default();
        assert_eq!(config.url, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_from_yaml() {
        let config = CheckConfig::from_yaml("url: http://localhost:8080/healthz\ntimeout: 1m30s\n")
            .unwrap();
        assert_eq!(config.url.as_deref(), Some("http://localhost:8080/healthz"));
        assert_eq!(config.timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_from_yaml_defaults_timeout() {
        let config = CheckConfig::from_yaml("url: https://api.test.com/\n").unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_from_yaml_expands_env_default() {
        let config =
            CheckConfig::from_yaml("url: http://${NONEXISTENT_HOST_12345:-db.internal}:5984/\n")
                .unwrap();
        assert_eq!(config.url.as_deref(), Some("http://db.internal:5984/"));
    }

    #[test]
    fn test_from_yaml_rejects_bad_duration() {
        let result = CheckConfig::from_yaml("url: http://x/\ntimeout: soon\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://127.0.0.1:9000/ready").unwrap();
        writeln!(file, "timeout: 250ms").unwrap();

        let config = CheckConfig::load(file.path()).unwrap();
        assert_eq!(config.url.as_deref(), Some("http://127.0.0.1:9000/ready"));
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CheckConfig::load(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_validate_requires_url() {
        let config = CheckConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("url is required"));

        let config = CheckConfig {
            url: Some("   ".to_string()),
            ..CheckConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = CheckConfig {
            url: Some("http://localhost/".to_string()),
            timeout: Duration::ZERO,
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout must be non-zero"));
    }
}
