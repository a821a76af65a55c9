mod add;
mod status;

use std::path::Path;

use clap::{Args, Subcommand};

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Author a new changeset interactively
    Add(AddArgs),
    /// List pending changesets
    Status,
}

#[derive(Args)]
pub(crate) struct AddArgs {
    /// Write an empty changeset without asking anything
    #[arg(long)]
    pub(crate) empty: bool,

    /// Open each written changeset in your editor
    #[arg(long)]
    pub(crate) open: bool,
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::Add(args) => add::run(&args, start_path),
            Self::Status => status::run(start_path),
        }
    }
}
