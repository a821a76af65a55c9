use changekit_core::{Changeset, ChangesetConfig};

use crate::Result;
use crate::error::OperationError;
use crate::traits::InteractionProvider;

const SUMMARY_QUESTION: &str = "Summary";

const EDITOR_PLACEHOLDER: &str = "\n\n\
    # Please enter a summary for your changes. This will appear in the\n\
    # changelog, so write it for the people consuming the release.\n\
    # An empty message aborts the editor and falls back to the console.\n";

const RETRY_REMINDER: &str =
    "A summary is required for the changeset; it ends up in the changelog.";

/// Populates a changeset's summary and confirmed flag.
///
/// A non-empty console answer is final but still needs the explicit
/// confirmation downstream. An empty answer opens the editor; non-empty
/// editor text is final and implicitly confirmed, since saving the editor
/// is itself an affirmative act. An editor failure or empty editor text
/// falls back to re-asking on the console until non-empty.
///
/// # Errors
///
/// Returns an error if the interaction cannot be completed.
pub fn collect_summary<I: InteractionProvider>(
    interaction: &I,
    config: &ChangesetConfig,
    changeset: &mut Changeset,
) -> Result<()> {
    let console_answer = if config.always_open_editor {
        String::new()
    } else {
        interaction.input(SUMMARY_QUESTION)?
    };

    if !console_answer.trim().is_empty() {
        changeset.summary = console_answer.trim().to_string();
        return Ok(());
    }

    match interaction.input_with_editor(EDITOR_PLACEHOLDER) {
        Ok(text) if !text.trim().is_empty() => {
            changeset.summary = text.trim().to_string();
            changeset.confirmed = true;
            return Ok(());
        }
        Ok(_) => {}
        Err(OperationError::Editor(source)) => {
            tracing::warn!(error = %source, "external editor failed, falling back to console input");
        }
        Err(other) => return Err(other),
    }

    let mut first_attempt = true;
    loop {
        if !first_attempt {
            interaction.show(RETRY_REMINDER);
        }
        first_attempt = false;

        let answer = interaction.input(SUMMARY_QUESTION)?;
        if !answer.trim().is_empty() {
            changeset.summary = answer.trim().to_string();
            return Ok(());
        }
    }
}
