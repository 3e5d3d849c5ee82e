#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Result};
use cz_conventional::answers::{AnswerSet, AnswerValue, Field};
use cz_conventional::questions::{QuestionKind, QuestionSpec};
use cz_conventional::runner::PromptRunner;
use tempfile::TempDir;

pub struct DirGuard {
    original: PathBuf,
}

impl DirGuard {
    pub fn enter(path: &Path) -> Self {
        let original = std::env::current_dir().expect("failed to read current directory");
        std::env::set_current_dir(path).expect("failed to change current directory");
        Self { original }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub struct EnvGuard {
    previous: HashMap<String, Option<String>>,
}

impl EnvGuard {
    pub fn set(pairs: &[(&str, &str)]) -> Self {
        let mut previous = HashMap::new();
        for (key, value) in pairs {
            previous.insert((*key).to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }
        Self { previous }
    }

    pub fn clear(keys: &[&str]) -> Self {
        let mut previous = HashMap::new();
        for key in keys {
            previous.insert((*key).to_string(), std::env::var(key).ok());
            std::env::remove_var(key);
        }
        Self { previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            if let Some(value) = value {
                std::env::set_var(key, value);
            } else {
                std::env::remove_var(key);
            }
        }
    }
}

pub fn cz_env_keys() -> [&'static str; 10] {
    [
        "CZ_CONFIG_HOME",
        "CZ_TYPE",
        "CZ_SCOPE",
        "CZ_SUBJECT",
        "CZ_BODY",
        "CZ_ISSUES",
        "CZ_SCOPES",
        "CZ_NORMALIZE_ISSUES",
        "CZ_REVIEW_COMMIT",
        "CZ_SUPPRESS_TOOL_OUTPUT",
    ]
}

/// Point every config-dir lookup at `dir` and clear CZ_ variables.
/// Guards are returned in unwind order.
pub fn isolate_config(dir: &Path) -> (EnvGuard, EnvGuard) {
    let cleared = EnvGuard::clear(&cz_env_keys());
    let dir = dir.to_string_lossy();
    let homes = EnvGuard::set(&[
        ("CZ_CONFIG_HOME", dir.as_ref()),
        ("XDG_CONFIG_HOME", dir.as_ref()),
        ("HOME", dir.as_ref()),
        ("APPDATA", dir.as_ref()),
    ]);
    (homes, cleared)
}

pub fn init_git_repo() -> TempDir {
    let repo = TempDir::new().expect("failed to create temp dir");
    git_ok(repo.path(), ["init"]);
    git_ok(repo.path(), ["config", "user.name", "Test User"]);
    git_ok(repo.path(), ["config", "user.email", "test@example.com"]);
    repo
}

pub fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("failed to write file");
}

pub fn git_ok<const N: usize>(cwd: &Path, args: [&str; N]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn git_stdout<const N: usize>(cwd: &Path, args: [&str; N]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// One scripted keystroke-level reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(&'static str),
    Flag(bool),
    Cancel,
}

/// Replays canned replies, re-asking on validation rejection like a terminal would.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    replies: VecDeque<Reply>,
    pub asked: Vec<Field>,
    pub rejections: Vec<(Field, String)>,
}

impl ScriptedRunner {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl PromptRunner for ScriptedRunner {
    fn ask(&mut self, question: &QuestionSpec, answers: &AnswerSet) -> Result<Option<AnswerValue>> {
        self.asked.push(question.field);
        loop {
            let Some(reply) = self.replies.pop_front() else {
                bail!("script exhausted at '{}'", question.field);
            };
            let input = match (reply, &question.kind) {
                (Reply::Cancel, _) => return Ok(None),
                (Reply::Flag(flag), QuestionKind::Confirm) => {
                    return Ok(Some(AnswerValue::Flag(flag)));
                }
                (Reply::Text(text), QuestionKind::Text | QuestionKind::Select(_)) => {
                    if text.is_empty() {
                        question.default_text().unwrap_or("").to_string()
                    } else {
                        text.to_string()
                    }
                }
                (reply, kind) => bail!("reply {reply:?} does not fit question kind {kind:?}"),
            };
            match question.validate(&input, answers) {
                Ok(()) => return Ok(Some(AnswerValue::Text(input))),
                Err(reason) => self.rejections.push((question.field, reason)),
            }
        }
    }
}
