use std::io::{self, Write};

use clap::Parser;
use tracing::debug;

use crate::cli::{editor::open_in_editor, Action, Cli};
use crate::config::ConfigManager;
use crate::errors::CliError;
use crate::ledger::{summary::two_places, Clock, LedgerStore};

/// Parses the process arguments and runs one command against stdout.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Loads (or bootstraps) the configuration, opens the store and performs the requested action.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), CliError> {
    let manager = ConfigManager::resolve(cli.config.clone());
    let (config, created) = manager.load_or_init()?;
    if created {
        eprintln!(
            "Configuration not found. Creating default configuration: {}",
            manager.config_path().display()
        );
    }

    let store = LedgerStore::open(config.resolve_storage_path(), config.budget.refill_amount)?;
    let action = cli.action();
    debug!(?action, root = %store.root().display(), "dispatching");

    match action {
        Action::Edit => open_in_editor(&config.app.editor, &store.current_file_path()),
        Action::Record {
            amount,
            description,
        } => {
            let record = store.add_expense(amount, &description)?;
            writeln!(
                out,
                "Recorded {} {}",
                two_places(record.amount.abs()),
                record.description
            )?;
            Ok(())
        }
        Action::Summary => print_summary(&store, out),
    }
}

/// Writes the summary table followed by the remaining balance.
fn print_summary<C: Clock, W: Write>(
    store: &LedgerStore<C>,
    out: &mut W,
) -> Result<(), CliError> {
    let summary = store.summary()?;
    write!(out, "{summary}")?;
    Ok(())
}
