// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::rc::Rc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use communefin::repo::TransactionRepository;
use communefin::store::{self, Store};
use communefin::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = Rc::new(Store::open_default()?);
    let mut repo = TransactionRepository::open(Rc::clone(&store));

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger initialized at {}", store::data_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut repo, sub)?,
        Some(("report", sub)) => commands::reports::handle(&repo, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&repo, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&repo, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
