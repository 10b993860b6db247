//! `stockledger` - A single-user inventory ledger with flat-file persistence
//!
//! This library provides the product ledger, the pipe-delimited stock file
//! format, and the interactive menu used by the `stock` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod product;
pub mod report;
pub mod shell;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use logging::init_logging;
pub use product::{Product, ProductUpdate};
pub use shell::{open_ledger, Shell, ShellOptions};
pub use store::{LoadReport, Store};
