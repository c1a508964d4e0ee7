//! Uploader configuration.
//!
//! Timing and policy defaults are compile-time constants. Hosts running
//! natively can override the policy from the environment with
//! [`UploaderConfig::from_env`] (after loading a `.env` file).

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::models::UploadPolicy;

/// Interval between two progress ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(300);

/// Pause between reaching 100% and firing the completion handler.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(500);

/// Smallest random progress increment (percent).
pub const MIN_INCREMENT: u8 = 5;

/// Largest random progress increment (percent, inclusive).
pub const MAX_INCREMENT: u8 = 14;

/// One mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Default per-file ceiling: 5 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 5 * MIB;

/// MIME types accepted when the policy does not say otherwise.
pub const DEFAULT_ALLOWED_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Maximum notifications kept by [`crate::MemoryNotifier`].
pub const MAX_NOTIFICATIONS: usize = 100;

/// Environment variable: per-file ceiling in MiB.
pub const ENV_MAX_SIZE_MB: &str = "BPC_UPLOAD_MAX_SIZE_MB";

/// Environment variable: comma-separated MIME allow-list.
pub const ENV_ALLOWED_TYPES: &str = "BPC_UPLOAD_ALLOWED_TYPES";

/// Environment variable: `true`/`false`, allow several files per submission.
pub const ENV_ALLOW_MULTIPLE: &str = "BPC_UPLOAD_ALLOW_MULTIPLE";

/// Session timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick_interval: Duration,
    pub completion_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            completion_delay: COMPLETION_DELAY,
        }
    }
}

/// Full uploader configuration: policy plus timing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploaderConfig {
    pub policy: UploadPolicy,
    pub timing: Timing,
}

impl UploaderConfig {
    /// Build a config from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = UploadPolicy::default();

        if let Some(raw) = lookup(ENV_MAX_SIZE_MB) {
            let invalid = || ConfigError::InvalidValue {
                key: ENV_MAX_SIZE_MB.to_string(),
                value: raw.clone(),
            };
            let mb: u64 = raw.trim().parse().map_err(|_| invalid())?;
            policy.max_size_bytes = mb.checked_mul(MIB).ok_or_else(invalid)?;
        }

        if let Some(raw) = lookup(ENV_ALLOWED_TYPES) {
            let types: Vec<String> = raw
                .split(',')
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            if types.is_empty() {
                return Err(ConfigError::EmptyAllowList);
            }
            policy.allowed_mime_types = types;
        }

        if let Some(raw) = lookup(ENV_ALLOW_MULTIPLE) {
            policy.allow_multiple = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_ALLOW_MULTIPLE.to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(Self {
            policy,
            timing: Timing::default(),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
