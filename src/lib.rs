//! Interactive builder for conventional commit messages.
//!
//! The [`engine::Engine`] owns the question sequence and the assembly rules;
//! asking the questions is delegated to a [`runner::PromptRunner`], and the
//! finished message is handed to a caller-supplied commit callback.

pub mod answers;
pub mod catalog;
pub mod cli;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod git;
pub mod questions;
pub mod runner;
pub mod ui;
pub mod wrap;

pub use answers::{AnswerSet, AnswerValue, Field};
pub use engine::{Engine, EngineOptions};
pub use error::EngineError;
