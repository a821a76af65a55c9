use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use changekit_core::{Changeset, PackageInfo};
use changekit_git::CommitInfo;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    ChangesetStore, EditorLauncher, GitProvider, InteractionProvider, OptionGroup,
    WrittenChangeset,
};

/// Interaction provider fed from per-method answer queues. Running out of
/// scripted answers panics, which in a test means the flow asked more
/// questions than the scenario expected.
#[derive(Default)]
pub struct ScriptedInteraction {
    confirms: Mutex<VecDeque<bool>>,
    selects: Mutex<VecDeque<usize>>,
    multi_selects: Mutex<VecDeque<Vec<String>>>,
    inputs: Mutex<VecDeque<String>>,
    editor_texts: Mutex<VecDeque<String>>,
    editor_fails: bool,
    shown: Mutex<Vec<String>>,
    multi_select_groups: Mutex<Vec<Vec<OptionGroup>>>,
}

impl ScriptedInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_confirms(self, answers: impl IntoIterator<Item = bool>) -> Self {
        *self.confirms.lock().expect("lock poisoned") = answers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_selects(self, answers: impl IntoIterator<Item = usize>) -> Self {
        *self.selects.lock().expect("lock poisoned") = answers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_multi_selects(self, answers: impl IntoIterator<Item = Vec<String>>) -> Self {
        *self.multi_selects.lock().expect("lock poisoned") = answers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_inputs<S: Into<String>>(self, answers: impl IntoIterator<Item = S>) -> Self {
        *self.inputs.lock().expect("lock poisoned") =
            answers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_editor_texts<S: Into<String>>(self, texts: impl IntoIterator<Item = S>) -> Self {
        *self.editor_texts.lock().expect("lock poisoned") =
            texts.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_failing_editor(mut self) -> Self {
        self.editor_fails = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn remaining_confirms(&self) -> usize {
        self.confirms.lock().expect("lock poisoned").len()
    }

    /// Groups passed to the first multi-select prompt.
    ///
    /// # Panics
    ///
    /// Panics if no multi-select happened yet.
    #[must_use]
    pub fn first_multi_select_groups(&self) -> Vec<OptionGroup> {
        self.multi_select_groups
            .lock()
            .expect("lock poisoned")
            .first()
            .expect("no multi-select was asked")
            .clone()
    }
}

impl InteractionProvider for ScriptedInteraction {
    fn confirm(&self, question: &str) -> Result<bool> {
        Ok(self
            .confirms
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted confirm: {question}")))
    }

    fn select(&self, question: &str, _options: &[&str]) -> Result<usize> {
        Ok(self
            .selects
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted select: {question}")))
    }

    fn multi_select(&self, question: &str, groups: &[OptionGroup]) -> Result<Vec<String>> {
        self.multi_select_groups
            .lock()
            .expect("lock poisoned")
            .push(groups.to_vec());
        Ok(self
            .multi_selects
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted multi-select: {question}")))
    }

    fn input(&self, question: &str) -> Result<String> {
        Ok(self
            .inputs
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted input: {question}")))
    }

    fn input_with_editor(&self, _placeholder: &str) -> Result<String> {
        if self.editor_fails {
            return Err(OperationError::Editor(std::io::Error::other(
                "scripted editor failure",
            )));
        }
        Ok(self
            .editor_texts
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted editor input")))
    }

    fn show(&self, message: &str) {
        self.shown
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
    }
}

/// Store that records written changesets and hands out sequential ids.
#[derive(Default)]
pub struct RecordingStore {
    written: Mutex<Vec<(Changeset, bool)>>,
}

impl RecordingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written(&self) -> Vec<(Changeset, bool)> {
        self.written.lock().expect("lock poisoned").clone()
    }
}

impl ChangesetStore for RecordingStore {
    fn write_changeset(
        &self,
        changeset: &Changeset,
        split_by_bump_type: bool,
    ) -> Result<WrittenChangeset> {
        let mut written = self.written.lock().expect("lock poisoned");
        let id = format!("mock-changeset-{}", written.len());
        written.push((changeset.clone(), split_by_bump_type));
        Ok(WrittenChangeset {
            path: PathBuf::from(format!("/mock/.changeset/{id}.md")),
            id,
        })
    }
}

#[derive(Default)]
pub struct RecordingGitProvider {
    staged: Mutex<Vec<PathBuf>>,
    commits: Mutex<Vec<String>>,
}

impl RecordingGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn commits(&self) -> Vec<String> {
        self.commits.lock().expect("lock poisoned").clone()
    }
}

impl GitProvider for RecordingGitProvider {
    fn stage_files(&self, _project_root: &Path, paths: &[&Path]) -> Result<()> {
        self.staged
            .lock()
            .expect("lock poisoned")
            .extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(())
    }

    fn commit(&self, _project_root: &Path, message: &str) -> Result<CommitInfo> {
        self.commits
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
        Ok(CommitInfo {
            sha: "abc123def456".to_string(),
            message: message.to_string(),
        })
    }
}

pub struct NullEditorLauncher;

impl EditorLauncher for NullEditorLauncher {
    fn open_detached(&self, _path: &Path) {}
}

#[derive(Default)]
pub struct RecordingEditorLauncher {
    opened: Mutex<Vec<PathBuf>>,
}

impl RecordingEditorLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().expect("lock poisoned").clone()
    }
}

impl EditorLauncher for RecordingEditorLauncher {
    fn open_detached(&self, path: &Path) {
        self.opened
            .lock()
            .expect("lock poisoned")
            .push(path.to_path_buf());
    }
}

/// # Panics
///
/// Panics if the version string is not valid semver.
#[must_use]
pub fn make_package(name: &str, version: &str) -> PackageInfo {
    PackageInfo {
        name: name.to_string(),
        version: version.parse().expect("valid version"),
    }
}
