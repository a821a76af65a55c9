use std::path::PathBuf;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Workdir-relative paths with uncommitted changes, untracked files
    /// included. Used to partition packages into changed and unchanged
    /// groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn modified_paths(&self) -> Result<Vec<PathBuf>> {
        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true),
        ))?;

        let mut paths = Vec::with_capacity(statuses.len());
        for entry in statuses.iter() {
            let path = entry.path().ok_or(GitError::NonUtf8Path)?;
            paths.push(PathBuf::from(path));
        }

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::setup_test_repo;
    use std::fs;
    use std::path::Path;

    #[test]
    fn clean_tree_has_no_modified_paths() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        assert!(repo.modified_paths()?.is_empty());
        Ok(())
    }

    #[test]
    fn untracked_file_is_reported() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;

        fs::write(dir.path().join("new_file.txt"), "content")?;

        let paths = repo.modified_paths()?;
        assert_eq!(paths, vec![Path::new("new_file.txt").to_path_buf()]);
        Ok(())
    }

    #[test]
    fn nested_untracked_files_are_reported() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;

        let nested = dir.path().join("crates").join("pkg-a");
        fs::create_dir_all(&nested)?;
        fs::write(nested.join("lib.rs"), "// changed")?;

        let paths = repo.modified_paths()?;
        assert!(
            paths
                .iter()
                .any(|p| p.starts_with(Path::new("crates/pkg-a")))
        );
        Ok(())
    }
}
