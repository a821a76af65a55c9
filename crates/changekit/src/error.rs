use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("git error")]
    Git(#[from] changekit_git::GitError),

    #[error("operation failed")]
    Operation(#[from] changekit_operations::OperationError),

    #[error("could not determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("no Cargo.toml found searching upwards from '{start_dir}'")]
    ProjectNotFound { start_dir: PathBuf },

    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("manifest at '{path}' is missing '{field}'")]
    ManifestMissingField { path: PathBuf, field: &'static str },

    #[error("invalid version '{version}' in manifest at '{path}'")]
    InvalidVersion {
        path: PathBuf,
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("invalid workspace member pattern '{pattern}'")]
    MemberPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to parse config at '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse changeset at '{path}'")]
    ChangesetParse {
        path: PathBuf,
        #[source]
        source: changekit_render::ParseError,
    },

    #[error("no packages found in project at '{0}'")]
    NoPackages(PathBuf),

    #[error("interactive mode requires a terminal")]
    NotATty,
}

pub type Result<T> = std::result::Result<T, CliError>;
