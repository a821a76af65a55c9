use serde::Deserialize;

use crate::types::ChangeCategory;

/// Session configuration, typically loaded from `.changeset/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChangesetConfig {
    /// When present, written changesets are committed automatically.
    pub commit: Option<CommitConfig>,
    /// Offer categorized change descriptions after release selection.
    pub ask_change_types: bool,
    /// Skip the console summary question and go straight to the editor.
    pub always_open_editor: bool,
    /// Categories offered when `ask_change_types` is enabled.
    pub categories: Vec<ChangeCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Append `[skip ci]` to generated commit messages.
    pub skip_ci: bool,
}

impl ChangesetConfig {
    /// Commit message for a freshly written changeset. Uses the first
    /// summary line; falls back to a fixed message for empty changesets.
    #[must_use]
    pub fn commit_message(&self, summary: &str) -> String {
        let first_line = summary.lines().next().unwrap_or("").trim();
        let subject = if first_line.is_empty() {
            "add empty changeset".to_string()
        } else {
            first_line.to_string()
        };

        let skip_ci = self.commit.as_ref().is_some_and(|c| c.skip_ci);
        if skip_ci {
            format!("docs(changeset): {subject} [skip ci]")
        } else {
            format!("docs(changeset): {subject}")
        }
    }
}
