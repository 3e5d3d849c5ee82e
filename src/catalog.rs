use std::fmt;

use serde::{Deserialize, Serialize};

/// A commit type key and its human description, e.g. `feat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub key: String,
    pub description: String,
}

impl TypeEntry {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// One selectable entry of the type list. Displays as its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

const CONVENTIONAL_TYPES: &[(&str, &str)] = &[
    ("feat", "A new feature"),
    ("fix", "A bug fix"),
    ("docs", "Documentation only changes"),
    (
        "style",
        "Changes that do not affect the meaning of the code (white-space, formatting, missing semi-colons, etc)",
    ),
    (
        "refactor",
        "A code change that neither fixes a bug nor adds a feature",
    ),
    ("perf", "A code change that improves performance"),
    ("test", "Adding missing tests or correcting existing tests"),
    (
        "build",
        "Changes that affect the build system or external dependencies (example scopes: gulp, broccoli, npm)",
    ),
    (
        "ci",
        "Changes to our CI configuration files and scripts (example scopes: Travis, Circle, BrowserStack, SauceLabs)",
    ),
    ("chore", "Other changes that don't modify src or test files"),
    ("revert", "Reverts a previous commit"),
];

/// The standard conventional-commit type registry, in display order.
pub fn conventional_types() -> Vec<TypeEntry> {
    CONVENTIONAL_TYPES
        .iter()
        .map(|(key, description)| TypeEntry::new(*key, *description))
        .collect()
}

/// Build the aligned choice list for the type question.
///
/// The `key:` token is right-padded to one past the longest key so every
/// description starts on the same column. Order follows `types`.
pub fn build_choices(types: &[TypeEntry]) -> Vec<Choice> {
    let width = types
        .iter()
        .map(|t| t.key.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    types
        .iter()
        .map(|t| Choice {
            label: format!("{:<width$} {}", format!("{}:", t.key), t.description),
            value: t.key.clone(),
        })
        .collect()
}
