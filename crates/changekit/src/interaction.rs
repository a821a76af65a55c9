use std::fs;
use std::io::Write as _;
use std::process::Command;

use changekit_operations::traits::{InteractionProvider, OptionGroup};
use changekit_operations::{OperationError, Result};
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Prompts on the controlling terminal via dialoguer. Escaping a prompt
/// maps to [`OperationError::Cancelled`].
pub struct TerminalInteractionProvider;

impl InteractionProvider for TerminalInteractionProvider {
    fn confirm(&self, question: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .interact_opt()
            .map_err(dialoguer_error)?
            .ok_or(OperationError::Cancelled)
    }

    fn select(&self, question: &str, options: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(question)
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(dialoguer_error)?
            .ok_or(OperationError::Cancelled)
    }

    fn multi_select(&self, question: &str, groups: &[OptionGroup]) -> Result<Vec<String>> {
        let annotate = groups.len() > 1;
        let mut choices = Vec::new();
        let mut items = Vec::new();
        for group in groups {
            for choice in &group.choices {
                if annotate {
                    items.push(format!("{choice}  [{}]", group.label));
                } else {
                    items.push(choice.clone());
                }
                choices.push(choice.clone());
            }
        }

        let selection = MultiSelect::new()
            .with_prompt(question)
            .items(&items)
            .interact_opt()
            .map_err(dialoguer_error)?
            .ok_or(OperationError::Cancelled)?;

        Ok(selection.into_iter().map(|i| choices[i].clone()).collect())
    }

    fn input(&self, question: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(dialoguer_error)
    }

    fn input_with_editor(&self, placeholder: &str) -> Result<String> {
        edit_in_editor(placeholder)
    }

    fn show(&self, message: &str) {
        println!("{message}");
    }
}

fn dialoguer_error(e: dialoguer::Error) -> OperationError {
    match e {
        dialoguer::Error::IO(io_err) => OperationError::Io(io_err),
    }
}

fn edit_in_editor(placeholder: &str) -> Result<String> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    let mut temp_file = tempfile::Builder::new()
        .suffix(".md")
        .tempfile()
        .map_err(OperationError::Editor)?;
    temp_file
        .write_all(placeholder.as_bytes())
        .map_err(OperationError::Editor)?;
    temp_file.flush().map_err(OperationError::Editor)?;

    let status = Command::new(&editor)
        .arg(temp_file.path())
        .status()
        .map_err(OperationError::Editor)?;

    if !status.success() {
        return Err(OperationError::Editor(std::io::Error::other(format!(
            "editor exited with status: {status}"
        ))));
    }

    let content = fs::read_to_string(temp_file.path()).map_err(OperationError::Editor)?;

    let text: String = content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(text.trim().to_string())
}
