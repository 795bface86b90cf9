//! Fanout command-line interface
//!
//! Runs the event channel walkthrough and validates configuration files.

pub mod commands;
pub mod demo;
pub mod logging;

pub use commands::{Cli, Commands};
