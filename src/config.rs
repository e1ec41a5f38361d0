//! Configuration system for persona-quiz
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (PERSONA_QUIZ_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::quiz::QuizVariant;

/// Main quiz configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Which quiz to present
    pub quiz: QuizSettings,

    /// Remote submission endpoint
    pub webhook: WebhookSettings,

    /// Local fallback log
    pub storage: StorageSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Quiz selection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Quiz variant: leadership or awareness
    pub variant: QuizVariant,
}

/// Webhook submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Attempt the remote submission at all
    pub enabled: bool,

    /// Endpoint override (defaults to the variant's own endpoint)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Local storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// CSV file that receives submissions the webhook did not take
    pub responses_file: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
            timeout_ms: 5000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            responses_file: "~/.persona-quiz/responses.csv".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

/// Values given on the command line, applied last
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub variant: Option<QuizVariant>,
    pub webhook_url: Option<String>,
    pub responses_file: Option<String>,
    pub offline: bool,
}

impl QuizConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_with(config_path, &CliOverrides::default())
    }

    /// Load configuration and apply command-line overrides on top
    pub fn load_with(config_path: Option<&str>, overrides: &CliOverrides) -> Result<Self> {
        let config = Self::resolve(config_path, overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Load only what reading the local log needs; webhook and logging
    /// settings are not checked.
    pub fn load_for_storage(config_path: Option<&str>, overrides: &CliOverrides) -> Result<Self> {
        let config = Self::resolve(config_path, overrides)?;
        config.validate_storage()?;
        Ok(config)
    }

    /// File, then environment, then command line, with paths expanded
    fn resolve(config_path: Option<&str>, overrides: &CliOverrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;
            config = toml::from_str(&content)
                .map_err(|e| Error::config_parse(format!("{}", path.display()), e))?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        config.apply_env_overrides()?;
        config.apply_cli_overrides(overrides);
        config.expand_paths();

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            Some(PathBuf::from("persona-quiz.toml")),
            dirs::config_dir().map(|p| p.join("persona-quiz").join("config.toml")),
            dirs::home_dir().map(|p| p.join(".persona-quiz").join("config.toml")),
            Some(PathBuf::from("/etc/persona-quiz/config.toml")),
        ];

        for path in search_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PERSONA_QUIZ_VARIANT") {
            self.quiz.variant = val.parse()?;
        }

        if let Ok(val) = std::env::var("PERSONA_QUIZ_WEBHOOK_ENABLED") {
            self.webhook.enabled = parse_bool(&val);
        }
        if let Ok(val) = std::env::var("PERSONA_QUIZ_WEBHOOK_URL") {
            self.webhook.url = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_QUIZ_WEBHOOK_TIMEOUT_MS") {
            self.webhook.timeout_ms = val.trim().parse().map_err(|_| {
                Error::config_field_invalid(
                    "webhook.timeout_ms",
                    format!(
                        "PERSONA_QUIZ_WEBHOOK_TIMEOUT_MS must be whole milliseconds, got '{}'",
                        val
                    ),
                )
            })?;
        }

        if let Ok(val) = std::env::var("PERSONA_QUIZ_RESPONSES_FILE") {
            self.storage.responses_file = val;
        }

        if let Ok(val) = std::env::var("PERSONA_QUIZ_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("PERSONA_QUIZ_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_QUIZ_LOG_JSON") {
            self.logging.json_format = parse_bool(&val);
        }

        Ok(())
    }

    fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(variant) = overrides.variant {
            self.quiz.variant = variant;
        }
        if let Some(ref url) = overrides.webhook_url {
            self.webhook.url = Some(url.clone());
        }
        if let Some(ref file) = overrides.responses_file {
            self.storage.responses_file = file.clone();
        }
        if overrides.offline {
            self.webhook.enabled = false;
        }
    }

    /// Expand ~ and environment variables in paths
    fn expand_paths(&mut self) {
        self.storage.responses_file = expand_path(&self.storage.responses_file);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let endpoint = self.webhook_url();
        let parsed = url::Url::parse(endpoint)
            .map_err(|e| Error::config_field_invalid("webhook.url", format!("'{}': {}", endpoint, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::config_field_invalid(
                "webhook.url",
                "Webhook URL must start with http:// or https://",
            ));
        }

        if self.webhook.timeout_ms == 0 || self.webhook.timeout_ms > 60_000 {
            return Err(Error::config_field_invalid(
                "webhook.timeout_ms",
                "timeout_ms must be between 1 and 60000",
            ));
        }

        self.validate_storage()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    fn validate_storage(&self) -> Result<()> {
        if self.storage.responses_file.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "storage.responses_file",
                "Responses file path cannot be empty",
            ));
        }
        Ok(())
    }

    /// Endpoint submissions are posted to
    pub fn webhook_url(&self) -> &str {
        self.webhook
            .url
            .as_deref()
            .unwrap_or_else(|| self.quiz.variant.default_webhook_url())
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_millis(self.webhook.timeout_ms)
    }

    pub fn responses_file(&self) -> PathBuf {
        PathBuf::from(&self.storage.responses_file)
    }
}

fn parse_bool(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(default_config_path);

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

    Ok(config_path)
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(".persona-quiz")
        .join("config.toml")
}

const DEFAULT_CONFIG: &str = r#"# persona-quiz configuration

[quiz]
# Quiz variant: "leadership" (senior management) or "awareness" (all staff)
variant = "leadership"

[webhook]
# Post each submission to the sheet webhook before falling back to the local file
enabled = true

# Endpoint override; each variant has its own default endpoint
# url = "https://script.google.com/macros/s/.../exec"

# Request timeout in milliseconds
timeout_ms = 5000

[storage]
# CSV file that receives submissions the webhook did not take
responses_file = "~/.persona-quiz/responses.csv"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.persona-quiz/logs/quiz.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.quiz.variant, QuizVariant::Leadership);
        assert!(config.webhook.enabled);
        assert_eq!(config.webhook.timeout_ms, 5000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.webhook_url(), QuizVariant::Leadership.default_webhook_url());
    }

    #[test]
    fn test_env_override() {
        env::set_var("PERSONA_QUIZ_WEBHOOK_TIMEOUT_MS", "five seconds");
        let err = QuizConfig::default().apply_env_overrides().unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigValidation { field: Some(ref field), .. } if field == "webhook.timeout_ms"
        ));

        env::set_var("PERSONA_QUIZ_WEBHOOK_TIMEOUT_MS", "2500");
        env::set_var("PERSONA_QUIZ_WEBHOOK_ENABLED", "0");
        env::set_var("PERSONA_QUIZ_LOG_JSON", "TRUE");

        let mut config = QuizConfig::default();
        config.apply_env_overrides().unwrap();

        assert_eq!(config.webhook.timeout_ms, 2500);
        assert!(!config.webhook.enabled);
        assert!(config.logging.json_format);

        env::remove_var("PERSONA_QUIZ_WEBHOOK_TIMEOUT_MS");
        env::remove_var("PERSONA_QUIZ_WEBHOOK_ENABLED");
        env::remove_var("PERSONA_QUIZ_LOG_JSON");
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = QuizConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            variant: Some(QuizVariant::Awareness),
            webhook_url: Some("http://127.0.0.1:9/hook".to_string()),
            responses_file: Some("/tmp/answers.csv".to_string()),
            offline: true,
        });

        assert_eq!(config.quiz.variant, QuizVariant::Awareness);
        assert_eq!(config.webhook_url(), "http://127.0.0.1:9/hook");
        assert_eq!(config.responses_file(), PathBuf::from("/tmp/answers.csv"));
        assert!(!config.webhook.enabled);
    }

    #[test]
    fn test_variant_selects_endpoint() {
        let mut config = QuizConfig::default();
        config.quiz.variant = QuizVariant::Awareness;
        assert_eq!(config.webhook_url(), QuizVariant::Awareness.default_webhook_url());
        assert_ne!(config.webhook_url(), QuizVariant::Leadership.default_webhook_url());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = QuizConfig::default();
        config.webhook.url = Some("ftp://files.example.com/drop".to_string());
        assert!(config.validate().is_err());

        config.webhook.url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let mut config = QuizConfig::default();
        config.webhook.timeout_ms = 0;
        assert!(config.validate().is_err());

        config.webhook.timeout_ms = 120_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = QuizConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_validation_ignores_webhook() {
        let mut config = QuizConfig::default();
        config.webhook.url = Some("not a url".to_string());
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
        assert!(config.validate_storage().is_ok());

        config.storage.responses_file = "  ".to_string();
        assert!(config.validate_storage().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(QuizConfig::default().validate().is_ok());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = QuizConfig::default();
        config.storage.responses_file = "~/quiz/responses.csv".to_string();
        config.expand_paths();
        assert!(!config.storage.responses_file.contains('~'));
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: QuizConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.quiz.variant, QuizVariant::Leadership);
        assert_eq!(config.webhook.timeout_ms, 5000);
        assert!(config.webhook.url.is_none());
    }

    #[test]
    fn test_parse_config_file() {
        let config_str = r#"
[quiz]
variant = "awareness"

[webhook]
enabled = false
url = "https://hooks.example.com/quiz"
timeout_ms = 3000

[storage]
responses_file = "/var/lib/quiz/responses.csv"
"#;

        let config: QuizConfig = toml::from_str(config_str).unwrap();

        assert_eq!(config.quiz.variant, QuizVariant::Awareness);
        assert!(!config.webhook.enabled);
        assert_eq!(config.webhook_url(), "https://hooks.example.com/quiz");
        assert_eq!(config.webhook.timeout_ms, 3000);
        assert_eq!(config.storage.responses_file, "/var/lib/quiz/responses.csv");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap();

        let written = init_config(Some(path_str), false).unwrap();
        assert_eq!(written, path);
        assert!(init_config(Some(path_str), false).is_err());
        assert!(init_config(Some(path_str), true).is_ok());
    }
}
