//! Fanout Events
//!
//! Observer-pattern event channels: an ordered registry of handlers that are
//! invoked synchronously, in registration order, with the same arguments.
//!
//! # Overview
//!
//! - **Handler** (`handler`): a type-erased callable compared by identity
//! - **Event Channel** (`channel`): the registry and its fan-out
//! - **Shared Channel** (`channel::shared`): a thread-safe handle that
//!   snapshots the registry at invoke time
//! - **Configuration** (`config`): YAML-backed channel and logging settings
//!
//! # Quick Start
//!
//! ```
//! use fanout_events::{EventChannel, Handler};
//!
//! let handler1 = Handler::from_fn(|e: &String| println!(" - Handler1: {}", e));
//! let handler2 = Handler::from_fn(|e: &String| println!(" - Handler2: {}", e));
//!
//! let mut signal = EventChannel::new();
//! signal += &handler1;
//! signal.invoke(&"First Call".to_string())?;
//!
//! signal += &handler2;
//! signal.invoke(&"Second Call".to_string())?;
//!
//! signal -= [handler1.clone(), handler2.clone()];
//! assert!(signal.is_empty());
//!
//! signal += [handler1, handler2];
//! signal.invoke(&"Fourth Call".to_string())?;
//! # Ok::<(), fanout_events::EventError>(())
//! ```
//!
//! # Error Handling
//!
//! Registration never fails. A handler returns `Result<(), HandlerError>`;
//! by default the first failure aborts the fan-out and is returned from
//! `invoke`. Channels configured with `FailurePolicy::Isolate` run every
//! handler and report all failures together.
//!
//! # Thread Safety
//!
//! Handlers are `Send + Sync`. `EventChannel` itself has no internal locking;
//! use `SharedEventChannel` to register and invoke from several threads.

pub mod channel;
pub mod config;
pub mod error;
pub mod handler;

pub use channel::{EventChannel, SharedEventChannel};
pub use config::{ChannelConfig, ConfigLoader, FailurePolicy, FanoutConfig, LoggingConfig};
pub use error::{EventError, HandlerError, HandlerFailure, Result};
pub use handler::{Handler, HandlerResult, IntoHandlers};
