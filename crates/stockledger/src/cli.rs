//! Command-line interface for stockledger.
//!
//! The `stock` binary takes no required arguments; every flag below only
//! overrides configuration for the interactive session.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::logging::Verbosity;

/// stock - Keep track of products, quantities and prices
///
/// Opens the stock file, runs an interactive menu to add, modify, delete,
/// list and search products, and saves the stock file on quit.
#[derive(Debug, Parser)]
#[command(name = "stock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stock file to use instead of the configured one
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum number of products
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub capacity: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                2 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(file) = &self.file {
            config.storage.path.clone_from(file);
        }
        if let Some(capacity) = self.capacity {
            config.storage.capacity = usize::try_from(capacity).unwrap_or(usize::MAX);
        }
    }
}
