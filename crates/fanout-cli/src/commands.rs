//! Command definitions and dispatch

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use fanout_events::{ConfigLoader, FanoutConfig};
use parking_lot::Mutex;

use crate::{demo, logging};

#[derive(Debug, Parser)]
#[command(name = "fanout")]
#[command(about = "Observer-pattern event channels", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register, invoke, and remove handlers on a channel
    Demo {
        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load a configuration file and print the effective settings
    CheckConfig {
        /// Configuration file (YAML)
        path: PathBuf,
    },
}

impl Cli {
    /// Configuration file named by the command, if any
    fn config_path(&self) -> Option<&Path> {
        match &self.command {
            Commands::Demo { config } => config.as_deref(),
            Commands::CheckConfig { path } => Some(path.as_path()),
        }
    }

    /// Load configuration, set up logging, and run the command
    pub fn run(self) -> anyhow::Result<()> {
        let config = match self.config_path() {
            Some(path) => ConfigLoader::load_required(path)?,
            None => FanoutConfig::default(),
        };
        logging::init_logging(&config.logging, self.log_level.as_deref())?;

        match self.command {
            Commands::Demo { .. } => {
                let out = Arc::new(Mutex::new(std::io::stdout()));
                demo::run_demo(config.channel, out)
            }
            Commands::CheckConfig { .. } => {
                let yaml = ConfigLoader::to_yaml(&config)?;
                std::io::stdout().write_all(yaml.as_bytes())?;
                Ok(())
            }
        }
    }
}
