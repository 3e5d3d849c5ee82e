use std::fmt;

use anyhow::{Context, Result};
use colored::Colorize;
use inquire::{InquireError, Select};

use crate::compose::ComposeOptions;

/// Yes/No prompt built on `Select`, with the default listed first.
/// Returns `None` on cancellation (Esc/Ctrl-C).
pub fn confirm(prompt: &str, default_val: bool) -> Result<Option<bool>> {
    let choices = if default_val {
        vec!["Yes", "No"]
    } else {
        vec!["No", "Yes"]
    };
    match Select::new(prompt, choices).prompt() {
        Ok(answer) => Ok(Some(answer == "Yes")),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Prompt failed"),
    }
}

/// Line shown before the questions start.
pub fn banner(options: &ComposeOptions) -> String {
    format!(
        "[CZ] Subject line will be forced to {} characters. All other lines will be wrapped at {} characters.",
        options.max_header_width, options.max_line_width
    )
}

pub fn print_banner(options: &ComposeOptions) {
    println!("\n{}\n", banner(options).dimmed());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Commit,
    Edit,
    Cancel,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewAction::Commit => "Commit",
            ReviewAction::Edit => "Edit message",
            ReviewAction::Cancel => "Cancel",
        })
    }
}

/// Indent every line of the message for the preview block.
pub fn preview(message: &str) -> String {
    message
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Show the composed message and let the user commit, edit or cancel.
///
/// Returns the message to commit, or `None` when cancelled.
pub fn review_message(message: String) -> Result<Option<String>> {
    let mut message = message;
    loop {
        println!("\n{}\n{}\n", "Commit message:".bold(), preview(&message));

        let actions = vec![ReviewAction::Commit, ReviewAction::Edit, ReviewAction::Cancel];
        let action = match Select::new("What next?", actions).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                ReviewAction::Cancel
            }
            Err(err) => return Err(err).context("Prompt failed"),
        };

        match action {
            ReviewAction::Commit => return Ok(Some(message)),
            ReviewAction::Cancel => return Ok(None),
            ReviewAction::Edit => {
                let edited = edit::edit(&message).context("Failed to open editor")?;
                let edited = edited.trim_end().to_string();
                if edited.trim().is_empty() {
                    println!("  {} Empty message, keeping the previous one", "note:".yellow().bold());
                } else {
                    message = edited;
                }
            }
        }
    }
}
