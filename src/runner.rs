use anyhow::{Context, Result};
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError, Select, Text};

use crate::answers::{AnswerSet, AnswerValue};
use crate::questions::{QuestionKind, QuestionSpec};
use crate::ui;

/// Collaborator that presents one question and returns an accepted answer.
///
/// Implementations own re-prompting: a returned value must satisfy the
/// question's validator. `Ok(None)` means the user aborted the session.
pub trait PromptRunner {
    fn ask(&mut self, question: &QuestionSpec, answers: &AnswerSet)
        -> Result<Option<AnswerValue>>;
}

/// Terminal runner backed by `inquire`.
#[derive(Debug)]
pub struct InquireRunner {
    page_size: usize,
}

impl InquireRunner {
    pub fn new() -> Self {
        Self { page_size: 12 }
    }
}

impl Default for InquireRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Map cancellation to `None`; everything else is a real failure.
fn cancelled_as_none<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Prompt failed"),
    }
}

impl PromptRunner for InquireRunner {
    fn ask(
        &mut self,
        question: &QuestionSpec,
        answers: &AnswerSet,
    ) -> Result<Option<AnswerValue>> {
        match &question.kind {
            QuestionKind::Select(choices) => {
                let cursor = question
                    .default_text()
                    .and_then(|d| choices.iter().position(|c| c.value == d))
                    .unwrap_or(0);
                let picked = Select::new(&question.message, choices.clone())
                    .with_starting_cursor(cursor)
                    .with_page_size(self.page_size)
                    .prompt();
                Ok(cancelled_as_none(picked)?.map(|choice| AnswerValue::Text(choice.value)))
            }
            QuestionKind::Text => {
                let mut prompt = Text::new(&question.message);
                if let Some(default) = question.default_text() {
                    prompt = prompt.with_default(default);
                }
                if let Some(validator) = question.validator.clone() {
                    let partial = answers.clone();
                    prompt = prompt.with_validator(
                        move |input: &str| -> Result<Validation, CustomUserError> {
                            Ok(match validator(input, &partial) {
                                Ok(()) => Validation::Valid,
                                Err(reason) => Validation::Invalid(reason.into()),
                            })
                        },
                    );
                }
                Ok(cancelled_as_none(prompt.prompt())?.map(AnswerValue::Text))
            }
            QuestionKind::Confirm => {
                Ok(ui::confirm(&question.message, question.default_flag())?.map(AnswerValue::Flag))
            }
        }
    }
}
