//! Error types for event channels
//!
//! Registration operations (`add`, `remove`, `contains`) never fail. The only
//! runtime failure is a handler returning an error during a fan-out, which is
//! surfaced to the caller of `invoke` according to the channel's
//! [`FailurePolicy`](crate::config::FailurePolicy).
//!
//! # Examples
//!
//! ```ignore
//! match channel.invoke(&"First Call".to_string()) {
//!     Ok(()) => {}
//!     Err(EventError::HandlerFailed { index, source }) => {
//!         eprintln!("handler #{} failed: {}", index, source)
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by a handler to abort (or be reported from) a fan-out
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HandlerError {
    /// Create a handler error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a handler error that wraps an underlying cause
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The message describing the failure
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A single failed handler, recorded when a channel isolates failures
#[derive(Debug)]
pub struct HandlerFailure {
    /// Position of the handler in the registry at invoke time
    pub index: usize,
    /// Error returned by the handler
    pub error: HandlerError,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.index, self.error)
    }
}

/// Errors that can occur while invoking or configuring event channels
#[derive(Debug, Error)]
pub enum EventError {
    /// A handler failed and the fan-out was aborted
    ///
    /// Handlers registered after `index` were not invoked.
    #[error("Handler #{index} failed: {source}")]
    HandlerFailed {
        index: usize,
        #[source]
        source: HandlerError,
    },

    /// One or more handlers failed while the channel isolated failures
    ///
    /// Every handler was invoked; the failures are listed in registry order.
    #[error("{} handler(s) failed: {}", .0.len(), join_failures(.0))]
    HandlersFailed(Vec<HandlerFailure>),

    /// Invalid channel configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EventError {
    /// Number of handlers that failed in the fan-out this error came from
    ///
    /// Configuration errors report zero.
    pub fn failure_count(&self) -> usize {
        match self {
            EventError::HandlerFailed { .. } => 1,
            EventError::HandlersFailed(failures) => failures.len(),
            _ => 0,
        }
    }
}

fn join_failures(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for event channel operations
pub type Result<T> = std::result::Result<T, EventError>;
