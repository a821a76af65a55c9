use std::path::Path;

use changekit_git::Repository;
use changekit_operations::operations::{AddInput, AddOperation};
use changekit_operations::providers::{FileSystemChangesetStore, Git2Provider};

use super::AddArgs;
use crate::config::load_config;
use crate::editor::SystemEditorLauncher;
use crate::environment::is_interactive;
use crate::error::{CliError, Result};
use crate::interaction::TerminalInteractionProvider;
use crate::workspace::{changed_package_names, discover_project};

pub(super) fn run(args: &AddArgs, start_path: &Path) -> Result<()> {
    if !args.empty && !is_interactive() {
        return Err(CliError::NotATty);
    }

    let project = discover_project(start_path)?;
    let config = load_config(&project.root)?;

    let changed_packages = if args.empty {
        Vec::new()
    } else {
        let repository = Repository::open(&project.root)?;
        changed_package_names(&project, &repository.modified_paths()?)
    };

    let input = AddInput {
        packages: project.packages.iter().map(|p| p.info.clone()).collect(),
        changed_packages,
        empty: args.empty,
        open: args.open,
    };

    let operation = AddOperation::new(
        TerminalInteractionProvider,
        FileSystemChangesetStore::new(&project.root),
        Git2Provider::new(),
        SystemEditorLauncher,
        config,
    );
    operation.execute(&project.root, &input)?;

    Ok(())
}
