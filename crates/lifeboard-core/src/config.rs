//! Ledger configuration
//!
//! Read from TOML. Every section is optional:
//!
//! ```toml
//! read_only = false
//!
//! [archive]
//! window_days = 7
//! retention = { purge_after_days = 90 }   # or "keep_forever"
//!
//! [partitions.task]
//! main = "dashboard_main_tasks"
//! personal = "tasks_personal"
//! occupational = "tasks_occ"
//! financial = "fin_tasks_v2"
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

use lifeboard_partition::PartitionTable;

use crate::error::ConfigError;

/// Default archive window in days
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// What happens to completed tasks older than the archive window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep them in storage indefinitely
    #[default]
    KeepForever,
    /// Purge them once completed longer ago than this many days
    PurgeAfterDays(u32),
}

/// Archive settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Rolling window of the archive view
    pub window_days: u32,
    /// Retention applied by an explicit sweep
    pub retention: RetentionPolicy,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            retention: RetentionPolicy::KeepForever,
        }
    }
}

impl ArchiveConfig {
    /// Archive window as a duration
    #[inline]
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::days(i64::from(self.window_days))
    }

    /// Age after which a sweep purges, `None` when keeping forever
    ///
    /// Never shorter than the archive window, so a sweep cannot remove a
    /// task that is still visible in the archive.
    #[must_use]
    pub fn retention_age(&self) -> Option<Duration> {
        match self.retention {
            RetentionPolicy::KeepForever => None,
            RetentionPolicy::PurgeAfterDays(days) => {
                Some(Duration::days(i64::from(days.max(self.window_days))))
            }
        }
    }
}

/// Complete ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Open the ledger in read-only (mentor) mode
    pub read_only: bool,
    /// Archive window and retention
    pub archive: ArchiveConfig,
    /// Storage keys per record kind and slot
    pub partitions: PartitionTable,
}

impl LedgerConfig {
    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on bad TOML and [`ConfigError::Invalid`]
    /// when validation fails
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`LedgerConfig::from_toml_str`]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded ledger config");
        Ok(config)
    }

    /// Check values that parse but cannot be used
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.archive.window_days == 0 {
            return Err(ConfigError::Invalid(
                "archive.window_days must be at least 1".to_string(),
            ));
        }
        self.partitions.validate().map_err(ConfigError::Invalid)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns the serializer error if the config cannot be encoded
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeboard_record::RecordKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.archive.window_days, 7);
        assert_eq!(config.archive.retention_age(), None);
    }

    #[test]
    fn parses_retention_and_partitions() {
        let config = LedgerConfig::from_toml_str(
            r#"
            read_only = true

            [archive]
            window_days = 14
            retention = { purge_after_days = 30 }

            [partitions.idea]
            main = "i_main"
            personal = "i_p"
            occupational = "i_o"
            financial = "i_f"
            "#,
        )
        .unwrap();

        assert!(config.read_only);
        assert_eq!(config.archive.retention, RetentionPolicy::PurgeAfterDays(30));
        assert_eq!(config.archive.retention_age(), Some(Duration::days(30)));
        assert_eq!(config.partitions.for_kind(RecordKind::Idea).main, "i_main");
        assert_eq!(
            config.partitions.for_kind(RecordKind::Task).main,
            "dashboard_main_tasks"
        );
    }

    #[test]
    fn keep_forever_as_plain_string() {
        let config =
            LedgerConfig::from_toml_str("[archive]\nretention = \"keep_forever\"\n").unwrap();
        assert_eq!(config.archive.retention, RetentionPolicy::KeepForever);
    }

    #[test]
    fn retention_never_undercuts_window() {
        let archive = ArchiveConfig {
            window_days: 7,
            retention: RetentionPolicy::PurgeAfterDays(2),
        };
        assert_eq!(archive.retention_age(), Some(Duration::days(7)));
    }

    #[test]
    fn zero_window_rejected() {
        let err = LedgerConfig::from_toml_str("[archive]\nwindow_days = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn key_shared_across_kinds_rejected() {
        let err = LedgerConfig::from_toml_str(
            r#"
            [partitions.focus]
            main = "dashboard_main_tasks"
            personal = "a"
            occupational = "b"
            financial = "c"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("dashboard_main_tasks"));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = LedgerConfig::from_toml_str("read_only = maybe").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_round_trip() {
        let mut config = LedgerConfig::default();
        config.archive.retention = RetentionPolicy::PurgeAfterDays(60);
        let text = config.to_toml_string().unwrap();
        assert_eq!(LedgerConfig::from_toml_str(&text).unwrap(), config);
    }
}
