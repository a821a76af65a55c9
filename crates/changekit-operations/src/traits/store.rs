use std::path::PathBuf;

use changekit_core::Changeset;

use crate::Result;

/// Identifier and location of a persisted changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenChangeset {
    pub id: String,
    pub path: PathBuf,
}

pub trait ChangesetStore: Send + Sync {
    /// Persists a changeset and returns its identifier and file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset cannot be written.
    fn write_changeset(
        &self,
        changeset: &Changeset,
        split_by_bump_type: bool,
    ) -> Result<WrittenChangeset>;
}
