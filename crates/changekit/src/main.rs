mod commands;
mod config;
mod editor;
mod environment;
mod error;
mod interaction;
mod workspace;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::commands::Commands;
use crate::error::CliError;

const EXIT_FIRST_MAJOR_DECLINED: u8 = 2;

#[derive(Parser)]
#[command(name = "changekit")]
#[command(about = "Author changesets for Cargo workspaces", long_about = None)]
struct Cli {
    /// Path to start project discovery from (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let start_path = match resolve_start_path(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = cli.command.execute(&start_path) {
        print_error(&e);
        return exit_code_for(&e);
    }
    ExitCode::SUCCESS
}

fn exit_code_for(error: &CliError) -> ExitCode {
    use changekit_operations::OperationError;

    match error {
        CliError::Operation(OperationError::FirstMajorDeclined { .. }) => {
            ExitCode::from(EXIT_FIRST_MAJOR_DECLINED)
        }
        _ => ExitCode::FAILURE,
    }
}

fn resolve_start_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
