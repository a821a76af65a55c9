use std::path::{Path, PathBuf};

use changekit_core::PackageInfo;
use globset::GlobBuilder;
use semver::Version;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// A package together with the directory its manifest lives in. The
/// directory is what maps modified files back onto packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPackage {
    pub info: PackageInfo,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    pub packages: Vec<DiscoveredPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<Package>,
    workspace: Option<WorkspaceSection>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    version: Option<VersionField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionField {
    Literal(String),
    Inherited(InheritedVersion),
}

#[derive(Debug, Deserialize)]
struct InheritedVersion {
    workspace: bool,
}

#[derive(Debug, Deserialize)]
struct WorkspaceSection {
    members: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    package: Option<WorkspacePackage>,
}

#[derive(Debug, Deserialize)]
struct WorkspacePackage {
    version: Option<String>,
}

/// Walks upwards from `start_dir` to the nearest workspace root (or, with
/// no workspace above, the nearest plain package) and enumerates its
/// packages.
///
/// # Errors
///
/// Returns an error if no manifest is found, a manifest cannot be read or
/// parsed, or a package version is missing or invalid.
pub fn discover_project(start_dir: &Path) -> Result<Project> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|source| CliError::ManifestRead {
            path: start_dir.to_path_buf(),
            source,
        })?;

    let (root, manifest) = find_project_root(&start_dir)?;
    let packages = collect_packages(&root, &manifest)?;

    if packages.is_empty() {
        return Err(CliError::NoPackages(root));
    }

    Ok(Project { root, packages })
}

fn find_project_root(start_dir: &Path) -> Result<(PathBuf, CargoManifest)> {
    let mut current = start_dir.to_path_buf();
    let mut fallback_single_package: Option<(PathBuf, CargoManifest)> = None;

    loop {
        let manifest_path = current.join("Cargo.toml");

        if manifest_path.exists() {
            let manifest = read_manifest(&manifest_path)?;

            if manifest.workspace.is_some() {
                return Ok((current, manifest));
            }

            if manifest.package.is_some() && fallback_single_package.is_none() {
                fallback_single_package = Some((current.clone(), manifest));
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => {
                return fallback_single_package.ok_or_else(|| CliError::ProjectNotFound {
                    start_dir: start_dir.to_path_buf(),
                });
            }
        }
    }
}

fn read_manifest(path: &Path) -> Result<CargoManifest> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| CliError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

fn collect_packages(root: &Path, manifest: &CargoManifest) -> Result<Vec<DiscoveredPackage>> {
    let workspace_version = manifest
        .workspace
        .as_ref()
        .and_then(|ws| ws.package.as_ref())
        .and_then(|pkg| pkg.version.as_ref());

    let mut packages = Vec::new();

    if let Some(pkg) = &manifest.package {
        let version = resolve_version(
            pkg.version.as_ref(),
            workspace_version,
            &root.join("Cargo.toml"),
        )?;
        packages.push(DiscoveredPackage {
            info: PackageInfo {
                name: pkg.name.clone(),
                version,
            },
            path: root.to_path_buf(),
        });
    }

    if let Some(workspace) = &manifest.workspace {
        let members = workspace.members.as_deref().unwrap_or(&[]);
        let excludes = workspace.exclude.as_deref().unwrap_or(&[]);

        for pattern in members {
            for member_dir in expand_member_pattern(root, pattern, excludes)? {
                let member_manifest_path = member_dir.join("Cargo.toml");
                if !member_manifest_path.exists() {
                    continue;
                }

                let member_manifest = read_manifest(&member_manifest_path)?;
                if let Some(pkg) = member_manifest.package {
                    let version = resolve_version(
                        pkg.version.as_ref(),
                        workspace_version,
                        &member_manifest_path,
                    )?;
                    packages.push(DiscoveredPackage {
                        info: PackageInfo {
                            name: pkg.name,
                            version,
                        },
                        path: member_dir,
                    });
                }
            }
        }
    }

    Ok(packages)
}

fn resolve_version(
    version_field: Option<&VersionField>,
    workspace_version: Option<&String>,
    manifest_path: &Path,
) -> Result<Version> {
    let version_str = match version_field {
        Some(VersionField::Literal(v)) => v.clone(),
        Some(VersionField::Inherited(inherited)) if inherited.workspace => workspace_version
            .ok_or_else(|| CliError::ManifestMissingField {
                path: manifest_path.to_path_buf(),
                field: "workspace.package.version",
            })?
            .clone(),
        Some(VersionField::Inherited(_)) | None => {
            return Err(CliError::ManifestMissingField {
                path: manifest_path.to_path_buf(),
                field: "package.version",
            });
        }
    };

    version_str.parse().map_err(|source| CliError::InvalidVersion {
        path: manifest_path.to_path_buf(),
        version: version_str,
        source,
    })
}

fn expand_member_pattern(root: &Path, pattern: &str, excludes: &[String]) -> Result<Vec<PathBuf>> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| CliError::MemberPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let exclude_matchers: Vec<_> = excludes
        .iter()
        .filter_map(|ex| {
            GlobBuilder::new(ex)
                .literal_separator(true)
                .build()
                .ok()
                .map(|g| g.compile_matcher())
        })
        .collect();

    let mut dirs = Vec::new();
    collect_matching_dirs(root, root, &glob, &exclude_matchers, &mut dirs)?;
    dirs.sort();

    Ok(dirs)
}

fn collect_matching_dirs(
    base: &Path,
    current: &Path,
    glob: &globset::GlobMatcher,
    excludes: &[globset::GlobMatcher],
    results: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(current)? {
        let path = entry?.path();

        if !path.is_dir() {
            continue;
        }

        let relative = path.strip_prefix(base).unwrap_or(&path);

        if excludes.iter().any(|ex| ex.is_match(relative)) {
            continue;
        }

        if glob.is_match(relative) {
            results.push(path.clone());
        }

        collect_matching_dirs(base, &path, glob, excludes, results)?;
    }

    Ok(())
}

/// Names of packages whose directories contain at least one of `paths`
/// (given relative to the project root). The most specific package
/// directory wins, so a workspace-root package does not swallow changes
/// inside member directories.
pub fn changed_package_names(project: &Project, paths: &[PathBuf]) -> Vec<String> {
    let mut changed = Vec::new();

    for package in &project.packages {
        let Ok(package_dir) = package.path.strip_prefix(&project.root) else {
            continue;
        };

        let touched = paths.iter().any(|path| {
            path.starts_with(package_dir) && owning_package(project, path) == Some(&package.info.name)
        });

        if touched {
            changed.push(package.info.name.clone());
        }
    }

    changed
}

fn owning_package<'a>(project: &'a Project, path: &Path) -> Option<&'a String> {
    project
        .packages
        .iter()
        .filter_map(|p| {
            let dir = p.path.strip_prefix(&project.root).ok()?;
            path.starts_with(dir).then_some((dir.components().count(), &p.info.name))
        })
        .max_by_key(|(depth, _)| *depth)
        .map(|(_, name)| name)
}
