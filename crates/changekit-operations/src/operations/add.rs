use std::path::Path;

use changekit_core::{Changeset, ChangesetConfig, PackageInfo};
use changekit_render::render_document;

use crate::Result;
use crate::operations::change_types::CategoriesChosen;
use crate::operations::selector::select_releases;
use crate::operations::summary::collect_summary;
use crate::traits::{
    ChangesetStore, EditorLauncher, GitProvider, InteractionProvider, WrittenChangeset,
};

const MAJOR_WARNING: &str = "\
WARNING: this changeset contains a major bump.
  What: a major release signals breaking changes to every consumer.
  Why:  consumers have to review and migrate before they can upgrade.
  How:  double-check the releases above and describe the migration path
        in the summary before this changeset is released.";

#[derive(Debug, Default)]
pub struct AddInput {
    /// The package universe for this session, supplied externally.
    pub packages: Vec<PackageInfo>,
    /// Names of packages with detected differences; drives the
    /// changed/unchanged grouping of the include-selection.
    pub changed_packages: Vec<String>,
    /// Write an empty changeset without any selection prompts.
    pub empty: bool,
    /// Open each written changeset in the editor, fire-and-forget.
    pub open: bool,
}

#[derive(Debug)]
pub struct AddResult {
    pub written: Vec<WrittenChangeset>,
    /// Changesets the user declined at the final confirmation.
    pub skipped: usize,
}

pub struct AddOperation<I, S, G, E> {
    interaction: I,
    store: S,
    git: G,
    editor: E,
    config: ChangesetConfig,
}

impl<I, S, G, E> AddOperation<I, S, G, E>
where
    I: InteractionProvider,
    S: ChangesetStore,
    G: GitProvider,
    E: EditorLauncher,
{
    pub fn new(interaction: I, store: S, git: G, editor: E, config: ChangesetConfig) -> Self {
        Self {
            interaction,
            store,
            git,
            editor,
            config,
        }
    }

    /// Runs the whole authoring session: release selection, optional
    /// change-type collection, summary collection, then the confirm-and-
    /// persist loop.
    ///
    /// # Errors
    ///
    /// Returns an error if an interaction fails, if the user declines a
    /// first major release in single-package mode, or if persisting or
    /// committing a changeset fails.
    pub fn execute(&self, project_root: &Path, input: &AddInput) -> Result<AddResult> {
        if input.empty {
            return self.write_changesets(project_root, vec![Changeset::empty()], false, input.open);
        }

        let releases =
            select_releases(&self.interaction, &input.packages, &input.changed_packages)?;

        let (changesets, split_by_bump_type) =
            match CategoriesChosen::choose(&self.interaction, &self.config)? {
                Some(chosen) => {
                    let output = chosen
                        .attach_releases(releases)
                        .build(&self.interaction)?
                        .collect_summaries(&self.interaction, &self.config)?;
                    (output.changesets, output.split_by_bump_type)
                }
                None => {
                    let mut changeset = Changeset::new(releases);
                    collect_summary(&self.interaction, &self.config, &mut changeset)?;
                    (vec![changeset], false)
                }
            };

        self.write_changesets(project_root, changesets, split_by_bump_type, input.open)
    }

    /// The writer loop: preview, confirm (unless already confirmed),
    /// persist, stage, optionally commit, warn on major bumps, optionally
    /// open the file detached.
    fn write_changesets(
        &self,
        project_root: &Path,
        changesets: Vec<Changeset>,
        split_by_bump_type: bool,
        open: bool,
    ) -> Result<AddResult> {
        let mut written = Vec::with_capacity(changesets.len());
        let mut skipped = 0;

        for changeset in changesets {
            let preview = render_document(&changeset, split_by_bump_type);
            self.interaction.show(&format!("\n{preview}"));

            if !changeset.confirmed
                && !self.interaction.confirm("Is this your desired changeset?")?
            {
                skipped += 1;
                continue;
            }

            let record = self.store.write_changeset(&changeset, split_by_bump_type)?;

            self.git.stage_files(project_root, &[&record.path])?;
            if self.config.commit.is_some() {
                let message = self.config.commit_message(&changeset.summary);
                self.git.commit(project_root, &message)?;
            }

            if changeset.has_major_release() {
                self.interaction.show(MAJOR_WARNING);
            } else {
                self.interaction
                    .show(&format!("Changeset written to {}", record.path.display()));
            }

            if open {
                self.editor.open_detached(&record.path);
            }

            written.push(record);
        }

        Ok(AddResult { written, skipped })
    }
}
