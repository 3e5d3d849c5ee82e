use std::fmt;
use std::sync::{Arc, LazyLock};

use regex_lite::Regex;

use crate::answers::{AnswerSet, AnswerValue, Field};
use crate::catalog::Choice;
use crate::compose::format_header;

/// Pure check of a candidate answer against the answers given so far.
/// `Err` carries the message shown before re-prompting.
pub type Validator = Arc<dyn Fn(&str, &AnswerSet) -> Result<(), String> + Send + Sync>;

/// Whether a question is shown, given the answers so far.
pub type Visibility = fn(&AnswerSet) -> bool;

static SINGLE_LOWERCASE_SCOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]*$").expect("scope pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Pick one of the listed choices; the answer is the choice value.
    Select(Vec<Choice>),
    Text,
    Confirm,
}

#[derive(Clone)]
pub struct QuestionSpec {
    pub field: Field,
    pub kind: QuestionKind,
    pub message: String,
    pub default: Option<AnswerValue>,
    pub validator: Option<Validator>,
    pub visibility: Option<Visibility>,
}

impl fmt::Debug for QuestionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionSpec")
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("validator", &self.validator.is_some())
            .field("visibility", &self.visibility.is_some())
            .finish()
    }
}

impl QuestionSpec {
    fn new(field: Field, kind: QuestionKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
            default: None,
            validator: None,
            visibility: None,
        }
    }

    fn with_default(mut self, default: Option<AnswerValue>) -> Self {
        self.default = default;
        self
    }

    fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    fn shown_when(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn is_visible(&self, answers: &AnswerSet) -> bool {
        self.visibility.map_or(true, |visible| visible(answers))
    }

    pub fn validate(&self, input: &str, answers: &AnswerSet) -> Result<(), String> {
        match &self.validator {
            Some(validator) => validator(input, answers),
            None => Ok(()),
        }
    }

    pub fn default_text(&self) -> Option<&str> {
        match &self.default {
            Some(AnswerValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn default_flag(&self) -> bool {
        matches!(self.default, Some(AnswerValue::Flag(true)))
    }
}

/// Inputs for [`build_questions`]; every default is optional.
#[derive(Debug, Clone, Default)]
pub struct QuestionDefaults<'a> {
    pub default_type: Option<&'a str>,
    pub scopes: Option<&'a [String]>,
    pub default_scope: Option<&'a str>,
    pub default_subject: Option<&'a str>,
    pub default_body: Option<&'a str>,
    pub default_issues: Option<&'a str>,
}

fn required(message: &str) -> String {
    format!("{message}:")
}

fn optional(message: &str) -> String {
    format!("{message}: (press ENTER to skip)")
}

fn question(message: &str) -> String {
    format!("{message}?")
}

fn text_default(value: Option<&str>) -> Option<AnswerValue> {
    value.map(|v| AnswerValue::Text(v.to_string()))
}

/// Strict scope rule: a single lowercase alphanumeric token, or nothing.
pub fn validate_scope(input: &str) -> Result<(), String> {
    let input = input.trim();
    if input.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("The scope must be lowercase.".into());
    }
    if !SINGLE_LOWERCASE_SCOPE.is_match(input) {
        return Err("You can only provide one scope.".into());
    }
    Ok(())
}

/// Strict subject rule: non-empty, lowercase first letter, header within `max_header`.
pub fn validate_subject(input: &str, answers: &AnswerSet, max_header: usize) -> Result<(), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("You must provide a description.".into());
    }
    if !input.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err("The description must begin with a lowercase character.".into());
    }
    let header = format_header(
        answers.text_or_empty(Field::Type),
        answers.text_or_empty(Field::Scope),
        input,
    );
    if header.chars().count() > max_header {
        return Err(format!(
            "The entire subject line, \"type(scope): description\", can not exceed {max_header} characters."
        ));
    }
    Ok(())
}

fn one_of(values: Vec<String>, what: &'static str) -> Validator {
    Arc::new(move |input: &str, _: &AnswerSet| {
        if values.iter().any(|v| v == input) {
            Ok(())
        } else {
            Err(format!("'{input}' is not a known {what}."))
        }
    })
}

/// The full question sequence, in asking order.
pub fn build_questions(
    choices: &[Choice],
    defaults: &QuestionDefaults<'_>,
    max_header: usize,
) -> Vec<QuestionSpec> {
    let type_values = choices.iter().map(|c| c.value.clone()).collect();
    let kind = QuestionSpec::new(
        Field::Type,
        QuestionKind::Select(choices.to_vec()),
        required("Select the type of change that you're committing"),
    )
    .with_default(text_default(defaults.default_type))
    .with_validator(one_of(type_values, "commit type"));

    let scope = match defaults.scopes {
        Some(scopes) if !scopes.is_empty() => QuestionSpec::new(
            Field::Scope,
            QuestionKind::Select(
                scopes
                    .iter()
                    .map(|s| Choice {
                        label: s.clone(),
                        value: s.clone(),
                    })
                    .collect(),
            ),
            required("Select the scope of this change"),
        )
        .with_validator(one_of(scopes.to_vec(), "scope")),
        _ => QuestionSpec::new(
            Field::Scope,
            QuestionKind::Text,
            optional("Type the scope of this change (e.g. one component or one file name)"),
        )
        .with_validator(Arc::new(|input: &str, _: &AnswerSet| validate_scope(input))),
    }
    .with_default(text_default(defaults.default_scope));

    let subject = QuestionSpec::new(
        Field::Subject,
        QuestionKind::Text,
        required(&format!(
            "Write a short, imperative tense description, starting lowercase. \
             Max {max_header} characters for the subject line, \"type(scope): description\""
        )),
    )
    .with_default(text_default(defaults.default_subject))
    .with_validator(Arc::new(move |input: &str, answers: &AnswerSet| {
        validate_subject(input, answers, max_header)
    }));

    let body = QuestionSpec::new(
        Field::Body,
        QuestionKind::Text,
        optional("Provide a longer description of the change"),
    )
    .with_default(text_default(defaults.default_body));

    let is_breaking = QuestionSpec::new(
        Field::IsBreaking,
        QuestionKind::Confirm,
        question("Are there any breaking changes"),
    )
    .with_default(Some(AnswerValue::Flag(false)));

    let breaking = QuestionSpec::new(
        Field::Breaking,
        QuestionKind::Text,
        required("Describe the breaking changes"),
    )
    .shown_when(|answers| answers.is_set(Field::IsBreaking));

    let has_default_issues = defaults.default_issues.is_some_and(|s| !s.is_empty());
    let is_issue_affected = QuestionSpec::new(
        Field::IsIssueAffected,
        QuestionKind::Confirm,
        question("Does this change affect any open issues"),
    )
    .with_default(Some(AnswerValue::Flag(has_default_issues)));

    let issues = QuestionSpec::new(
        Field::Issues,
        QuestionKind::Text,
        required("Add issue references (e.g. \"fix #123\", \"re #123\")"),
    )
    .with_default(text_default(defaults.default_issues.filter(|s| !s.is_empty())))
    .shown_when(|answers| answers.is_set(Field::IsIssueAffected));

    vec![
        kind,
        scope,
        subject,
        body,
        is_breaking,
        breaking,
        is_issue_affected,
        issues,
    ]
}
