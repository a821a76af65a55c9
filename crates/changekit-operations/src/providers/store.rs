use std::fs;
use std::path::{Path, PathBuf};

use changekit_core::Changeset;
use changekit_render::render_document;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangesetStore, WrittenChangeset};

pub const CHANGESET_DIR: &str = ".changeset";

const MAX_FILENAME_ATTEMPTS: usize = 100;

pub struct FileSystemChangesetStore {
    changeset_dir: PathBuf,
}

impl FileSystemChangesetStore {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            changeset_dir: project_root.join(CHANGESET_DIR),
        }
    }

    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }
}

impl ChangesetStore for FileSystemChangesetStore {
    fn write_changeset(
        &self,
        changeset: &Changeset,
        split_by_bump_type: bool,
    ) -> Result<WrittenChangeset> {
        fs::create_dir_all(&self.changeset_dir).map_err(|source| {
            OperationError::ChangesetDirCreate {
                path: self.changeset_dir.clone(),
                source,
            }
        })?;

        let id = generate_unique_id(&self.changeset_dir);
        let path = self.changeset_dir.join(format!("{id}.md"));

        let content = render_document(changeset, split_by_bump_type);
        fs::write(&path, content).map_err(|source| OperationError::ChangesetWrite {
            path: path.clone(),
            source,
        })?;

        Ok(WrittenChangeset { id, path })
    }
}

fn generate_unique_id(changeset_dir: &Path) -> String {
    for _ in 0..MAX_FILENAME_ATTEMPTS {
        if let Some(name) = petname::petname(3, "-") {
            if !changeset_dir.join(format!("{name}.md")).exists() {
                return name;
            }
        }
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("changeset-{timestamp}")
}
