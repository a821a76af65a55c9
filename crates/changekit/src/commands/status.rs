use std::collections::BTreeMap;
use std::path::Path;

use changekit_core::BumpType;
use changekit_operations::providers::CHANGESET_DIR;
use changekit_render::parse_document;

use crate::error::{CliError, Result};
use crate::workspace::discover_project;

pub(super) fn run(start_path: &Path) -> Result<()> {
    let project = discover_project(start_path)?;
    let pending = pending_changesets(&project.root)?;

    if pending.is_empty() {
        println!("No pending changesets.");
        return Ok(());
    }

    println!("Pending changesets: {}", pending.len());
    for name in &pending {
        println!("  {name}");
    }

    let bumps = projected_bumps(&project.root, &pending)?;
    if !bumps.is_empty() {
        println!();
        println!("Projected bumps:");
        for (package, bump) in &bumps {
            println!("  {package}: {bump}");
        }
    }

    Ok(())
}

fn pending_changesets(project_root: &Path) -> Result<Vec<String>> {
    let dir = project_root.join(CHANGESET_DIR);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "md") {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    Ok(names)
}

/// Highest bump each package would receive across all pending changesets.
fn projected_bumps(project_root: &Path, pending: &[String]) -> Result<BTreeMap<String, BumpType>> {
    let dir = project_root.join(CHANGESET_DIR);
    let mut bumps: BTreeMap<String, BumpType> = BTreeMap::new();

    for name in pending {
        let path = dir.join(name);
        let contents = std::fs::read_to_string(&path)?;
        let changeset =
            parse_document(&contents).map_err(|source| CliError::ChangesetParse { path, source })?;

        for release in changeset.releases {
            if release.bump_type == BumpType::None {
                continue;
            }
            let entry = bumps.entry(release.name).or_insert(BumpType::None);
            *entry = (*entry).max(release.bump_type);
        }
    }

    Ok(bumps)
}
