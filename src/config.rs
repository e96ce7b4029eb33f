//! Configuration management for Wikiscout
//!
//! Parses TOML configuration files and provides typed access to settings.
//! The Gemini API key is deliberately NOT part of the file: it is read from
//! the `GEMINI_API_KEY` environment variable, and a missing key is a fatal
//! startup condition.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub save: SaveConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Outbound request timeout in seconds. Omitted means no timeout, which
    /// leaves each collaborator's own default in effect.
    #[serde(default)]
    request_timeout_seconds: Option<u64>,
}

impl ServerConfig {
    /// Get the configured outbound timeout, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    /// Get the configured outbound timeout in whole seconds, if any
    pub fn request_timeout_seconds(&self) -> Option<u64> {
        self.request_timeout_seconds
    }
}

/// Model collaborator configuration
///
/// Fields are private to keep validated data valid: configuration is loaded
/// via deserialization and checked in `Config::validate()`, after which it
/// cannot be mutated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    name: String,
    #[serde(default = "default_model_base_url")]
    base_url: String,
}

impl ModelConfig {
    /// Get the model identifier (e.g. "gemini-1.5-flash")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the API base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            base_url: default_model_base_url(),
        }
    }
}

fn default_model_name() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_model_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Lookup collaborator configuration (Wikipedia REST API)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    #[serde(default = "default_lookup_base_url")]
    base_url: String,
}

impl LookupConfig {
    /// Get the API base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_lookup_base_url(),
        }
    }
}

fn default_lookup_base_url() -> String {
    "https://en.wikipedia.org/api/rest_v1".to_string()
}

/// Save collaborator configuration
///
/// The save tool appends one newline-terminated text blob per call to this
/// file. The log is never read back by the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SaveConfig {
    #[serde(default = "default_save_path")]
    pub path: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: default_save_path(),
        }
    }
}

fn default_save_path() -> String {
    "research_output.txt".to_string()
}

/// Static asset configuration
///
/// When `dir` is set and the directory exists, its contents are served as a
/// fallback beneath `/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StaticFilesConfig {
    #[serde(default)]
    dir: Option<PathBuf>,
}

impl StaticFilesConfig {
    /// Get the configured static asset directory, if any
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        // Phase 1: Read file (preserves io::Error context)
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            crate::error::AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        // Phase 2: Parse TOML (preserves toml::de::Error context)
        let config: Self = toml::from_str(&content).map_err(|source| {
            crate::error::AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            }
        })?;

        // Phase 3: Validate parsed config (provides contextual reason)
        config
            .validate()
            .map_err(|e| crate::error::AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()`, but can also be called
    /// explicitly when constructing Config via other means (e.g., in tests).
    pub fn validate(&self) -> crate::error::AppResult<()> {
        for (section, base_url) in [
            ("model", self.model.base_url.as_str()),
            ("lookup", self.lookup.base_url.as_str()),
        ] {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(crate::error::AppError::Config(format!(
                    "Configuration error: {}.base_url '{}' is invalid. \
                    base_url must start with 'http://' or 'https://'.",
                    section, base_url
                )));
            }
        }

        if self.model.name.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "Configuration error: model.name must not be empty. \
                Example fix - add to config.toml:\n\
                [model]\n\
                name = \"gemini-1.5-flash\""
                    .to_string(),
            ));
        }

        if self.save.path.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "Configuration error: save.path must not be empty".to_string(),
            ));
        }

        // Timeout is optional; when present it must be usable.
        if let Some(timeout) = self.server.request_timeout_seconds {
            if timeout == 0 {
                return Err(crate::error::AppError::Config(
                    "Configuration error: request_timeout_seconds must be greater than 0. \
                    Omit the field entirely to disable the timeout."
                        .to_string(),
                ));
            }
            if timeout > 300 {
                return Err(crate::error::AppError::Config(format!(
                    "Configuration error: request_timeout_seconds cannot exceed 300 seconds (5 minutes), got {}",
                    timeout
                )));
            }
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = crate::error::AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str).map_err(|source| {
            crate::error::AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            }
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Gemini API key, resolved from the environment at startup
///
/// Wrapped in its own type so the key never appears in Debug output or log
/// lines. Absence of the key refuses startup rather than degrading silently.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read the key from `GEMINI_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns a config error if the variable is unset or blank.
    pub fn from_env() -> crate::error::AppResult<Self> {
        match std::env::var(API_KEY_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value)),
            _ => Err(crate::error::AppError::Config(format!(
                "{} must be set to a non-empty Gemini API key. \
                The server refuses to start without it.",
                API_KEY_ENV_VAR
            ))),
        }
    }

    /// Construct a key from a known value (primarily for tests)
    pub fn new(value: impl Into<String>) -> crate::error::AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "API key must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the raw key for request construction
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8000
request_timeout_seconds = 30

[model]
name = "gemini-1.5-flash"
base_url = "https://generativelanguage.googleapis.com/v1beta"

[lookup]
base_url = "https://en.wikipedia.org/api/rest_v1"

[save]
path = "research_output.txt"

[observability]
log_level = "info"
"#;

    #[test]
    fn test_config_from_str_parses_successfully() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.request_timeout_seconds(), Some(30));
    }

    #[test]
    fn test_config_parses_collaborator_sections() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        assert_eq!(config.model.name(), "gemini-1.5-flash");
        assert_eq!(
            config.model.base_url(),
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(
            config.lookup.base_url(),
            "https://en.wikipedia.org/api/rest_v1"
        );
        assert_eq!(config.save.path, "research_output.txt");
    }

    #[test]
    fn test_config_with_missing_sections_uses_defaults() {
        let minimal_config = r#"
[server]
host = "0.0.0.0"
port = 8000
"#;
        let config = Config::from_str(minimal_config).expect("should parse minimal config");
        assert_eq!(config.model.name(), "gemini-1.5-flash");
        assert_eq!(
            config.lookup.base_url(),
            "https://en.wikipedia.org/api/rest_v1"
        );
        assert_eq!(config.save.path, "research_output.txt");
        assert_eq!(config.observability.log_level, "info");
        assert!(config.static_files.dir().is_none());
    }

    #[test]
    fn test_config_timeout_defaults_to_none() {
        let minimal_config = r#"
[server]
host = "0.0.0.0"
port = 8000
"#;
        let config = Config::from_str(minimal_config).expect("should parse");
        // No timeout configured = no timeout applied, matching the original
        // service where collaborator defaults are in effect.
        assert_eq!(config.server.request_timeout(), None);
    }

    #[test]
    fn test_config_validation_zero_timeout_fails() {
        let config_str = r#"
[server]
host = "127.0.0.1"
port = 8000
request_timeout_seconds = 0
"#;
        let result = Config::from_str(config_str);
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.contains("request_timeout_seconds") && err_msg.contains("greater than 0"),
            "Expected error about request_timeout_seconds > 0, got: {}",
            err_msg
        );
    }

    #[test]
    fn test_config_validation_excessive_timeout_fails() {
        let config_str = r#"
[server]
host = "127.0.0.1"
port = 8000
request_timeout_seconds = 301
"#;
        let result = Config::from_str(config_str);
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.contains("request_timeout_seconds") && err_msg.contains("300"),
            "Expected error about request_timeout_seconds max 300, got: {}",
            err_msg
        );
    }

    #[test]
    fn test_config_validation_invalid_model_base_url_fails() {
        let config_str = r#"
[server]
host = "127.0.0.1"
port = 8000

[model]
name = "gemini-1.5-flash"
base_url = "generativelanguage.googleapis.com"
"#;
        let result = Config::from_str(config_str);
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("base_url"));
        assert!(err_msg.contains("http"));
    }

    #[test]
    fn test_config_validation_invalid_lookup_base_url_fails() {
        let config_str = r#"
[server]
host = "127.0.0.1"
port = 8000

[lookup]
base_url = "ftp://en.wikipedia.org"
"#;
        let result = Config::from_str(config_str);
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("lookup.base_url"));
    }

    #[test]
    fn test_config_validation_empty_model_name_fails() {
        let config_str = r#"
[server]
host = "127.0.0.1"
port = 8000

[model]
name = "  "
"#;
        let result = Config::from_str(config_str);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("model.name"));
    }

    #[test]
    fn test_base_url_accessor_strips_trailing_slash() {
        let config_str = r#"
[server]
host = "127.0.0.1"
port = 8000

[lookup]
base_url = "https://en.wikipedia.org/api/rest_v1/"
"#;
        let config = Config::from_str(config_str).expect("should parse");
        assert_eq!(
            config.lookup.base_url(),
            "https://en.wikipedia.org/api/rest_v1"
        );
    }

    #[test]
    fn test_api_key_new_rejects_empty() {
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
        assert!(ApiKey::new("k").is_ok());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").expect("should build key");
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
