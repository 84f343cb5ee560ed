use std::fmt;

use serde::{Deserialize, Serialize};

/// Logging level shown when the configuration does not carry one.
pub const DEFAULT_LOGGING_LEVEL: &str = "INFO";

/// Hardware address of a device row. Opaque: it is compared byte for byte
/// against the row's `data-mac` attribute and sent to the server verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Page configuration object handed to the scripts by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging_level: Option<String>,
}

impl AppConfig {
    pub fn with_logging_level(level: impl Into<String>) -> Self {
        Self {
            logging_level: Some(level.into()),
        }
    }

    /// The configured level, or `INFO` when it is missing or empty.
    pub fn effective_logging_level(&self) -> &str {
        match self.logging_level.as_deref() {
            Some(level) if !level.is_empty() => level,
            _ => DEFAULT_LOGGING_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Name used in the `alert-<kind>` class.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Netureon logging level names, as stored in the `logging_level` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoggingLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LoggingLevel {
    pub const ALL: [LoggingLevel; 5] = [
        LoggingLevel::Debug,
        LoggingLevel::Info,
        LoggingLevel::Warning,
        LoggingLevel::Error,
        LoggingLevel::Critical,
    ];

    /// Case-insensitive lookup; unknown names fall back to `INFO` like the
    /// server does.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            LoggingLevel::Debug => "DEBUG",
            LoggingLevel::Info => "INFO",
            LoggingLevel::Warning => "WARNING",
            LoggingLevel::Error => "ERROR",
            LoggingLevel::Critical => "CRITICAL",
        }
    }

    /// `tracing` has no level above ERROR, so CRITICAL maps onto it.
    pub fn tracing_directive(self) -> &'static str {
        match self {
            LoggingLevel::Debug => "debug",
            LoggingLevel::Info => "info",
            LoggingLevel::Warning => "warn",
            LoggingLevel::Error | LoggingLevel::Critical => "error",
        }
    }
}

impl fmt::Display for LoggingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_logging_level() {
        assert_eq!(AppConfig::default().effective_logging_level(), "INFO");
        assert_eq!(AppConfig::with_logging_level("").effective_logging_level(), "INFO");
        assert_eq!(
            AppConfig::with_logging_level("DEBUG").effective_logging_level(),
            "DEBUG"
        );
        // Anything goes, the page does not validate levels.
        assert_eq!(
            AppConfig::with_logging_level("verbose").effective_logging_level(),
            "verbose"
        );
    }

    #[test]
    fn test_app_config_from_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.logging_level, None);

        let config: AppConfig =
            serde_json::from_str(r#"{"logging_level": "WARNING", "scanning_interval": "300"}"#)
                .unwrap();
        assert_eq!(config.effective_logging_level(), "WARNING");
    }

    #[test]
    fn test_logging_level_lookup() {
        assert_eq!(LoggingLevel::from_name("debug"), LoggingLevel::Debug);
        assert_eq!(LoggingLevel::from_name(" CRITICAL "), LoggingLevel::Critical);
        assert_eq!(LoggingLevel::from_name("loud"), LoggingLevel::Info);
        assert_eq!(LoggingLevel::Critical.tracing_directive(), "error");
    }

    #[test]
    fn test_device_id_serializes_as_string() {
        let json = serde_json::to_string(&DeviceId::from("AA:BB:CC:DD:EE:FF")).unwrap();
        assert_eq!(json, "\"AA:BB:CC:DD:EE:FF\"");
    }
}
