//! `stock` - interactive inventory ledger
//!
//! Opens the stock file, runs the menu on stdin/stdout, and saves on quit.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;

use stockledger::cli::Cli;
use stockledger::{init_logging, open_ledger, Config, Shell, ShellOptions, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let store = Store::new(config.stock_path());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let ledger = open_ledger(&store, config.storage.capacity, &mut stdout)?;
    let mut shell = Shell::new(
        stdin.lock(),
        stdout,
        ledger,
        store,
        ShellOptions::from(&config),
    );
    shell.run()?;
    shell.save()?;

    Ok(())
}
