use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] changekit_git::GitError),

    #[error("failed to create changeset directory '{path}'")]
    ChangesetDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changeset file '{path}'")]
    ChangesetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external editor could not be run or was aborted. The summary
    /// collector recovers from this by falling back to console input.
    #[error("external editor failed")]
    Editor(#[source] std::io::Error),

    /// The user declined the first-major-release confirmation in
    /// single-package mode. Fatal for the whole session.
    #[error("aborted: declined the first major release of '{package}'")]
    FirstMajorDeclined { package: String },

    #[error("operation cancelled")]
    Cancelled,

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OperationError>;
