//! Command-line surface: argument parsing, dispatch, and the editor hand-off.

mod editor;
mod shell;

use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

use crate::utils::build_info;

pub use editor::open_in_editor;
pub use shell::{run, run_cli};

#[derive(Parser, Debug)]
#[command(
    name = "budget",
    version,
    long_version = build_info::LONG_VERSION,
    about = "Command line budget tracker using simple text files",
    after_help = "Happy budgeting :)"
)]
pub struct Cli {
    /// Edit the current week's file in the configured editor (all other arguments are ignored)
    #[arg(short = 'e', long = "edit")]
    pub edit: bool,

    /// Configuration file [default: $SIMPLE_BUDGET_CONFIG or ./config.json]
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Amount of the expense
    #[arg(allow_negative_numbers = true)]
    pub amount: Option<Decimal>,

    /// Description of the purchase
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub description: Vec<String>,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit,
    Record { amount: Decimal, description: String },
    Summary,
}

impl Cli {
    /// `--edit` wins over everything else; an amount records an expense; otherwise summarize.
    pub fn action(&self) -> Action {
        if self.edit {
            return Action::Edit;
        }
        match self.amount {
            Some(amount) => Action::Record {
                amount,
                description: self.description.join(" "),
            },
            None => Action::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("budget").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_prints_summary() {
        assert_eq!(parse(&[]).action(), Action::Summary);
    }

    #[test]
    fn amount_and_words_record_an_expense() {
        assert_eq!(
            parse(&["42.50", "weekly", "groceries"]).action(),
            Action::Record {
                amount: dec!(42.50),
                description: "weekly groceries".into(),
            }
        );
        assert_eq!(
            parse(&["3"]).action(),
            Action::Record {
                amount: dec!(3),
                description: String::new(),
            }
        );
    }

    #[test]
    fn negative_amount_is_a_value_not_a_flag() {
        assert_eq!(
            parse(&["-5", "refund-typo"]).action(),
            Action::Record {
                amount: dec!(-5),
                description: "refund-typo".into(),
            }
        );
    }

    #[test]
    fn edit_takes_precedence() {
        assert_eq!(parse(&["-e", "12", "ignored"]).action(), Action::Edit);
        assert_eq!(parse(&["--edit"]).action(), Action::Edit);
    }

    #[test]
    fn config_flag_is_parsed() {
        let cli = parse(&["--config", "/tmp/budget.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/budget.json")));
        assert_eq!(cli.action(), Action::Summary);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = Cli::try_parse_from(["budget", "coffee", "4"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
