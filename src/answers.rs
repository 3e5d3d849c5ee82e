use std::collections::BTreeMap;
use std::fmt;

/// Question identifiers, in the order the questions are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Type,
    Scope,
    Subject,
    Body,
    IsBreaking,
    Breaking,
    IsIssueAffected,
    Issues,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Scope => "scope",
            Field::Subject => "subject",
            Field::Body => "body",
            Field::IsBreaking => "isBreaking",
            Field::Breaking => "breaking",
            Field::IsIssueAffected => "isIssueAffected",
            Field::Issues => "issues",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

/// Answers collected so far, keyed by question.
///
/// Skipped questions have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: BTreeMap<Field, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, value: AnswerValue) {
        self.values.insert(field, value);
    }

    /// Builder-style insert of a text answer.
    pub fn with_text(mut self, field: Field, value: impl Into<String>) -> Self {
        self.insert(field, AnswerValue::Text(value.into()));
        self
    }

    /// Builder-style insert of a yes/no answer.
    pub fn with_flag(mut self, field: Field, value: bool) -> Self {
        self.insert(field, AnswerValue::Flag(value));
        self
    }

    pub fn get(&self, field: Field) -> Option<&AnswerValue> {
        self.values.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match self.values.get(&field) {
            Some(AnswerValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Text answer or the empty string when absent.
    pub fn text_or_empty(&self, field: Field) -> &str {
        self.text(field).unwrap_or("")
    }

    pub fn flag(&self, field: Field) -> Option<bool> {
        match self.values.get(&field) {
            Some(AnswerValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.flag(field).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }
}
