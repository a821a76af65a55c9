use std::path::Path;

use changekit_git::{CommitInfo, Repository};

use crate::Result;
use crate::traits::GitProvider;

/// [`GitProvider`] backed by git2. The repository is discovered from the
/// project root on every call; `git2::Repository` is not `Sync`, so the
/// provider itself stays stateless.
pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.stage_files(paths)?)
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        let repo = Repository::open(project_root)?;
        Ok(repo.commit(message)?)
    }
}
