//! Host configuration
//!
//! Third-party script locations and the comment widget id. Passed in by the
//! page as JSON; never read from or written to LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Log verbosity for the browser console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Analytics script tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Script URL
    pub src: String,
    /// Site domain reported via `data-domain`
    pub domain: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            src: "https://plausible.io/js/plausible.js".to_string(),
            domain: "ludocalendar.com".to_string(),
        }
    }
}

/// Comment widget script tag and init id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Script URL
    pub src: String,
    /// Project id passed to the widget's global init function
    pub project_id: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            src: "https://unpkg.com/commentbox.io/dist/commentBox.min.js".to_string(),
            project_id: "5701926784073728-proj".to_string(),
        }
    }
}

/// Everything the host needs besides storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    pub log_level: LogLevel,
    pub analytics: AnalyticsConfig,
    pub comments: CommentsConfig,
}

impl BridgeConfig {
    /// Parse config JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse optional config JSON, falling back to defaults on error
    pub fn load(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            log::info!("Using default bridge config");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded bridge config");
                config
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let config = BridgeConfig::default();
        assert_eq!(config.comments.project_id, "5701926784073728-proj");
        assert_eq!(config.analytics.domain, "ludocalendar.com");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BridgeConfig::from_json(
            r#"{"log_level": "debug", "comments": {"project_id": "test-proj"}}"#,
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.comments.project_id, "test-proj");
        assert_eq!(config.comments.src, CommentsConfig::default().src);
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            BridgeConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
        assert!(BridgeConfig::from_json(r#"{"log_level": "loud"}"#).is_err());
    }

    #[test]
    fn test_load_is_lenient() {
        assert_eq!(BridgeConfig::load(None), BridgeConfig::default());
        assert_eq!(BridgeConfig::load(Some("   ")), BridgeConfig::default());
        assert_eq!(BridgeConfig::load(Some("not json")), BridgeConfig::default());
        assert_eq!(
            BridgeConfig::load(Some(r#"{"log_level": "warn"}"#)).log_level,
            LogLevel::Warn
        );
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::Warn.to_level(), log::Level::Warn);
        assert_eq!(LogLevel::Trace.as_str(), "trace");
    }
}
