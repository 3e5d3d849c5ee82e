use anyhow::Result;
use tracing::{debug, warn};

use crate::answers::AnswerSet;
use crate::catalog::{build_choices, Choice, TypeEntry};
use crate::compose::{compose, ComposeOptions};
use crate::error::EngineError;
use crate::questions::{build_questions, QuestionDefaults, QuestionSpec};
use crate::runner::PromptRunner;

/// Everything the engine needs, supplied explicitly by the caller.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub types: Vec<TypeEntry>,
    pub default_type: Option<String>,
    /// Fixed scope list; turns the scope question into a select.
    pub scopes: Option<Vec<String>>,
    pub default_scope: Option<String>,
    pub default_subject: Option<String>,
    pub default_body: Option<String>,
    pub default_issues: Option<String>,
    pub compose: ComposeOptions,
}

/// Holds the choice list and question sequence for one configuration.
#[derive(Debug)]
pub struct Engine {
    options: EngineOptions,
    choices: Vec<Choice>,
    questions: Vec<QuestionSpec>,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Result<Self, EngineError> {
        if options.types.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        let choices = build_choices(&options.types);
        if let Some(default_type) = options.default_type.as_deref() {
            if !choices.iter().any(|c| c.value == default_type) {
                warn!(default_type, "default type is not in the catalog; ignoring it");
            }
        }

        let defaults = QuestionDefaults {
            default_type: options.default_type.as_deref(),
            scopes: options.scopes.as_deref(),
            default_scope: options.default_scope.as_deref(),
            default_subject: options.default_subject.as_deref(),
            default_body: options.default_body.as_deref(),
            default_issues: options.default_issues.as_deref(),
        };
        let questions = build_questions(&choices, &defaults, options.compose.max_header_width);
        debug!(
            types = choices.len(),
            questions = questions.len(),
            "engine ready"
        );

        Ok(Self {
            options,
            choices,
            questions,
        })
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Ask every visible question in order.
    ///
    /// Returns `Ok(None)` when the runner reports that the user aborted.
    pub fn prompt(&self, runner: &mut dyn PromptRunner) -> Result<Option<AnswerSet>> {
        let mut answers = AnswerSet::new();

        for question in &self.questions {
            if !question.is_visible(&answers) {
                debug!(field = %question.field, "question skipped");
                continue;
            }
            match runner.ask(question, &answers)? {
                Some(value) => answers.insert(question.field, value),
                None => {
                    debug!(field = %question.field, "prompt session aborted");
                    return Ok(None);
                }
            }
        }

        Ok(Some(answers))
    }

    pub fn compose(&self, answers: &AnswerSet) -> Result<String, EngineError> {
        compose(answers, &self.options.compose)
    }

    /// Prompt, compose and hand the message to `commit`.
    ///
    /// `commit` is called at most once, and never when the session is aborted.
    /// Returns whether a message was committed.
    pub fn run<F>(&self, runner: &mut dyn PromptRunner, commit: F) -> Result<bool>
    where
        F: FnOnce(&str) -> Result<()>,
    {
        let Some(answers) = self.prompt(runner)? else {
            return Ok(false);
        };
        let message = self.compose(&answers)?;
        commit(&message)?;
        Ok(true)
    }
}
