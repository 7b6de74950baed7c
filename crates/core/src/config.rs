// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination configuration
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! lease_duration = "5m"
//! code_length = 10
//!
//! [notify]
//! enabled = ["voucher:*", "lease:acquired"]
//! queue_depth = 256
//!
//! [store]
//! compact_after = 1000
//! ```

use crate::notice::{Notice, NoticePattern};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default lease window (5 minutes)
pub const DEFAULT_LEASE_DURATION: Duration = Duration::from_secs(300);

/// Longest lease a config may ask for (30 days)
pub const MAX_LEASE_DURATION: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for the lease manager, allocator and notice dispatch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoordinationConfig {
    /// How long an acquired or extended lease stays valid
    #[serde(with = "humantime_serde")]
    pub lease_duration: Duration,
    /// Length of generated voucher codes
    pub code_length: usize,
    pub notify: NotifyConfig,
    pub store: StoreConfig,
}

impl Default for CoordinationConfig {
    fn default() -> Self {
        Self {
            lease_duration: DEFAULT_LEASE_DURATION,
            code_length: crate::id::RandomCodeGen::DEFAULT_LEN,
            notify: NotifyConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl CoordinationConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_lease_duration(mut self, duration: Duration) -> Self {
        self.lease_duration = duration;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.lease_duration.is_zero() {
            return Err(ConfigError::Invalid(
                "lease_duration must be greater than zero".to_string(),
            ));
        }
        if self.lease_duration > MAX_LEASE_DURATION {
            return Err(ConfigError::Invalid(format!(
                "lease_duration must be at most {}s",
                MAX_LEASE_DURATION.as_secs()
            )));
        }
        if self.notify.queue_depth == 0 {
            return Err(ConfigError::Invalid(
                "notify.queue_depth must be at least 1".to_string(),
            ));
        }
        if self.store.compact_after == 0 {
            return Err(ConfigError::Invalid(
                "store.compact_after must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which notices are forwarded to the notification adapter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    /// Notice name patterns to forward; everything else is dropped
    pub enabled: Vec<NoticePattern>,
    /// Maximum notices buffered before new ones are dropped
    pub queue_depth: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: vec![NoticePattern::new("voucher:*")],
            queue_depth: 256,
        }
    }
}

impl NotifyConfig {
    /// Check if a notice should be forwarded
    pub fn should_notify(&self, notice: &Notice) -> bool {
        let name = notice.name();
        self.enabled.iter().any(|p| p.matches(name))
    }
}

/// Durable store tuning
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Committed batches the log may hold before it is folded into a snapshot
    pub compact_after: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            compact_after: 1000,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
