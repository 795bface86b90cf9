//! Channel configuration
//!
//! Configuration is read from YAML:
//!
//! ```yaml
//! channel:
//!   name: demo
//!   failure_policy: isolate
//! logging:
//!   level: debug
//! ```
//!
//! Every field is optional; omitted fields take their defaults.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// How a fan-out reacts to a failing handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure and return it; later handlers are skipped
    #[default]
    FailFast,
    /// Invoke every handler and report all failures afterwards
    Isolate,
}

/// Settings applied to an [`EventChannel`](crate::EventChannel)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Name used in log output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Failure policy used by `invoke`
    pub failure_policy: FailurePolicy,
}

/// Logging settings for binaries built on event channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum log level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanoutConfig {
    pub channel: ChannelConfig,
    pub logging: LoggingConfig,
}
