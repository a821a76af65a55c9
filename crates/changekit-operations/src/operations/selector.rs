use changekit_core::{BumpType, PackageInfo, Release};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{InteractionProvider, OptionGroup};

const EMPTY_SELECTION_HINT: &str =
    "You must select at least one package (space to select, enter to confirm).";

/// Walks the user through assigning a bump type to every included package.
///
/// With exactly one package in the universe this is a single list choice;
/// with more it is the grouped include-selection followed by one
/// multi-select per severity, most severe first, with everything left over
/// swept into the final bucket without a prompt.
///
/// # Errors
///
/// Returns [`OperationError::FirstMajorDeclined`] when the sole package's
/// first major release is declined; interaction errors are propagated.
pub fn select_releases<I: InteractionProvider>(
    interaction: &I,
    packages: &[PackageInfo],
    changed_packages: &[String],
) -> Result<Vec<Release>> {
    if let [package] = packages {
        return select_single(interaction, package);
    }
    select_multi(interaction, packages, changed_packages)
}

fn select_single<I: InteractionProvider>(
    interaction: &I,
    package: &PackageInfo,
) -> Result<Vec<Release>> {
    let options = [
        "patch - bug fixes (backwards compatible)",
        "minor - new features (backwards compatible)",
        "major - breaking changes",
    ];

    let question = format!("What kind of change is this for '{}'?", package.name);
    let bump = match interaction.select(&question, &options)? {
        0 => BumpType::Patch,
        1 => BumpType::Minor,
        _ => BumpType::Major,
    };

    if bump == BumpType::Major && !confirm_major(interaction, package)? {
        return Err(OperationError::FirstMajorDeclined {
            package: package.name.clone(),
        });
    }

    Ok(vec![Release::new(package.name.clone(), bump)])
}

fn select_multi<I: InteractionProvider>(
    interaction: &I,
    packages: &[PackageInfo],
    changed_packages: &[String],
) -> Result<Vec<Release>> {
    let selected = select_included_packages(interaction, packages, changed_packages)?;

    let mut unclassified = selected.clone();
    let mut releases: Vec<Release> = Vec::with_capacity(selected.len());

    // Every severity except the final bucket gets its own prompt.
    for severity in [BumpType::Major, BumpType::Minor] {
        if unclassified.is_empty() {
            break;
        }

        let group = OptionGroup::new(
            format!("{severity} bump"),
            unclassified.iter().map(format_package).collect(),
        );
        let question = format!("Which packages should have a {severity} bump?");
        let chosen = interaction.multi_select(&question, &[group])?;

        for label in chosen {
            let Some(index) = unclassified.iter().position(|p| format_package(p) == label) else {
                continue;
            };

            if severity == BumpType::Major && !confirm_major(interaction, &unclassified[index])? {
                // Declined: the package returns to the pool instead of
                // leaving the release set.
                continue;
            }

            let package = unclassified.remove(index);
            releases.push(Release::new(package.name, severity));
        }
    }

    // Forced assignment of everything still unclassified.
    for package in unclassified {
        releases.push(Release::new(package.name, BumpType::Patch));
    }

    // Restore the include-selection order for downstream grouping.
    releases.sort_by_key(|release| {
        selected
            .iter()
            .position(|p| p.name == release.name)
            .unwrap_or(usize::MAX)
    });

    Ok(releases)
}

/// The initial include-selection. Re-prompts with a visible hint until at
/// least one package is chosen; this is the only unbounded retry loop in
/// the flow.
fn select_included_packages<I: InteractionProvider>(
    interaction: &I,
    packages: &[PackageInfo],
    changed_packages: &[String],
) -> Result<Vec<PackageInfo>> {
    let (changed, unchanged): (Vec<&PackageInfo>, Vec<&PackageInfo>) = packages
        .iter()
        .partition(|p| changed_packages.contains(&p.name));

    let mut groups = Vec::new();
    if !changed.is_empty() {
        groups.push(OptionGroup::new(
            "changed packages",
            changed.iter().map(|p| format_package(p)).collect(),
        ));
    }
    if !unchanged.is_empty() {
        groups.push(OptionGroup::new(
            "unchanged packages",
            unchanged.iter().map(|p| format_package(p)).collect(),
        ));
    }

    loop {
        let chosen =
            interaction.multi_select("Which packages would you like to include?", &groups)?;

        if chosen.is_empty() {
            interaction.show(EMPTY_SELECTION_HINT);
            continue;
        }

        let ordered: Vec<PackageInfo> = changed
            .iter()
            .chain(unchanged.iter())
            .filter(|p| chosen.contains(&format_package(p)))
            .map(|p| (*p).clone())
            .collect();
        return Ok(ordered);
    }
}

/// First-major-release confirmation. Versions at or above 1.0.0
/// auto-confirm without a prompt.
fn confirm_major<I: InteractionProvider>(
    interaction: &I,
    package: &PackageInfo,
) -> Result<bool> {
    if !package.is_pre_major() {
        return Ok(true);
    }

    let question = format!(
        "'{}' is at version {}. A major bump will be its first major release. Continue?",
        package.name, package.version
    );
    interaction.confirm(&question)
}

fn format_package(package: &PackageInfo) -> String {
    format!("{} ({})", package.name, package.version)
}
