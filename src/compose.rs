use std::sync::LazyLock;

use regex_lite::Regex;

use crate::answers::{AnswerSet, Field};
use crate::error::EngineError;
use crate::wrap::wrap_text;

pub const MAX_HEADER_WIDTH: usize = 72;
pub const MAX_LINE_WIDTH: usize = 100;
pub const BREAKING_PREFIX: &str = "BREAKING CHANGE: ";

static ISSUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+-[0-9]+)").expect("issue token pattern is valid"));

/// Layout knobs for message assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Wrap width for body and footer lines.
    pub max_line_width: usize,
    /// Longest header the subject validator accepts. Never used to truncate.
    pub max_header_width: usize,
    /// Append a `#KEY-123` reference after the first tracker ticket in the issues text.
    pub normalize_issues: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            max_line_width: MAX_LINE_WIDTH,
            max_header_width: MAX_HEADER_WIDTH,
            normalize_issues: false,
        }
    }
}

/// `(scope)` for a non-blank scope, nothing otherwise.
pub fn format_scope(scope: &str) -> String {
    let scope = scope.trim();
    if scope.is_empty() {
        String::new()
    } else {
        format!("({scope})")
    }
}

/// `type(scope): subject`
pub fn format_header(kind: &str, scope: &str, subject: &str) -> String {
    format!("{kind}{}: {}", format_scope(scope), subject.trim())
}

/// Prefix the breaking-change text with exactly one `BREAKING CHANGE: `.
pub fn breaking_footer(text: &str) -> String {
    let text = text.trim();
    let text = text
        .strip_prefix(BREAKING_PREFIX.trim_end())
        .map(str::trim_start)
        .unwrap_or(text);
    format!("{BREAKING_PREFIX}{text}")
}

/// Turn the first bare ticket token `KEY-123` into `KEY-123, #KEY-123`.
pub fn normalize_issue_refs(issues: &str) -> String {
    ISSUE_TOKEN.replace(issues, "$1, #$1").into_owned()
}

/// Assemble the final commit message from a completed answer set.
///
/// `type` and `subject` must be present; every other answer is treated as
/// empty or `false` when absent. Conditional texts are ignored unless their
/// guarding flag is set, so stale values never leak into the footer.
pub fn compose(answers: &AnswerSet, options: &ComposeOptions) -> Result<String, EngineError> {
    let kind = answers
        .text(Field::Type)
        .ok_or(EngineError::MissingAnswer(Field::Type.as_str()))?;
    let subject = answers
        .text(Field::Subject)
        .ok_or(EngineError::MissingAnswer(Field::Subject.as_str()))?;

    let header = format_header(kind, answers.text_or_empty(Field::Scope), subject);
    let width = options.max_line_width;

    let body = answers.text_or_empty(Field::Body).trim();
    let body = if body.is_empty() {
        String::new()
    } else {
        wrap_text(body, width)
    };

    let breaking = answers.text_or_empty(Field::Breaking).trim();
    let breaking = if answers.is_set(Field::IsBreaking) && !breaking.is_empty() {
        wrap_text(&breaking_footer(breaking), width)
    } else {
        String::new()
    };

    let issues = answers.text_or_empty(Field::Issues).trim();
    let issues = if answers.is_set(Field::IsIssueAffected) && !issues.is_empty() {
        if options.normalize_issues {
            wrap_text(&normalize_issue_refs(issues), width)
        } else {
            wrap_text(issues, width)
        }
    } else {
        String::new()
    };

    let footer = [breaking, issues]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut message = format!("{header}\n\n{body}");
    if !footer.is_empty() {
        message.push_str("\n\n");
        message.push_str(&footer);
    }
    Ok(message)
}
