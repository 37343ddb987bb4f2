mod commands;
mod helpers;

use bsg_core::domain::BsgError;
use clap::Parser;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let error = error.as_bsg_error();
            eprintln!("{}", error.diagnostic_line());
            if let Some(summary_line) = error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "bsg-rs", version, about = "Allowed and first-forbidden beta spectrum generator")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Compute the full spectrum of a transition deck and write the results
    Run(commands::RunArgs),
    /// Print the decay rate at selected kinetic energies
    Evaluate(commands::EvaluateArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Run(args) => commands::run_spectrum_command(args),
        CliCommand::Evaluate(args) => commands::run_evaluate_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(BsgError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<BsgError> for CliError {
    fn from(error: BsgError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_bsg_error(&self) -> BsgError {
        match self {
            Self::Usage(message) => BsgError::configuration("CLI.USAGE", message.trim_end()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => BsgError::internal("CLI.INTERNAL", format!("{error:#}")),
        }
    }
}
