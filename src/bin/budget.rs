use colored::Colorize;
use simple_budget::{cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli() {
        eprintln!("{} {err}", "Error:".red().bold());
        std::process::exit(1);
    }
}
