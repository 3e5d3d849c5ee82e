use thiserror::Error;

/// Errors raised by the message engine itself.
///
/// Validation rejections are not errors; they are reported per candidate
/// value by the question validators and handled by the prompt runner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("The commit type catalog is empty. Configure at least one type.")]
    EmptyCatalog,

    #[error("Answer set is missing the required '{0}' answer")]
    MissingAnswer(&'static str),
}
