use crate::Result;

/// A labeled group of choices inside a multi-select. Groups with no
/// choices are omitted by the caller before prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub label: String,
    pub choices: Vec<String>,
}

impl OptionGroup {
    #[must_use]
    pub fn new(label: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            label: label.into(),
            choices,
        }
    }
}

/// The prompt service the interactive flow talks to. Every method blocks
/// until the user answers; prompts are strictly sequential. A user escape
/// surfaces as [`crate::OperationError::Cancelled`], an editor problem in
/// [`InteractionProvider::input_with_editor`] as
/// [`crate::OperationError::Editor`].
pub trait InteractionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Single choice among `options`; returns the chosen index.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn select(&self, question: &str, options: &[&str]) -> Result<usize>;

    /// Multi-select over grouped choices; returns the chosen values.
    /// An empty result is valid here, callers enforce non-emptiness
    /// where they need it.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn multi_select(&self, question: &str, groups: &[OptionGroup]) -> Result<Vec<String>>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn input(&self, question: &str) -> Result<String>;

    /// Opens the external editor pre-filled with `placeholder` and returns
    /// the entered text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OperationError::Editor`] when no suitable editor is
    /// available or the user aborts it.
    fn input_with_editor(&self, placeholder: &str) -> Result<String>;

    /// Prints a message interleaved with the prompts.
    fn show(&self, message: &str);
}
