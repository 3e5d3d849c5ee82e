mod common;

use cz_conventional::answers::Field;
use cz_conventional::catalog::{conventional_types, TypeEntry};
use cz_conventional::compose::ComposeOptions;
use cz_conventional::{Engine, EngineError, EngineOptions};

use crate::common::{Reply, ScriptedRunner};

fn engine() -> Engine {
    Engine::new(EngineOptions {
        types: conventional_types(),
        ..EngineOptions::default()
    })
    .expect("engine should build")
}

#[test]
fn empty_catalog_is_rejected_at_construction() {
    let err = Engine::new(EngineOptions::default()).expect_err("should reject");
    assert_eq!(err, EngineError::EmptyCatalog);
}

#[test]
fn choices_are_built_once_from_the_catalog() {
    let engine = Engine::new(EngineOptions {
        types: vec![TypeEntry::new("feat", "A new feature"), TypeEntry::new("fix", "A bug fix")],
        ..EngineOptions::default()
    })
    .expect("engine");
    let values: Vec<_> = engine.choices().iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["feat", "fix"]);
    assert_eq!(engine.questions().len(), 8);
}

#[test]
fn skipped_questions_are_absent_from_answers() {
    let mut runner = ScriptedRunner::new([
        Reply::Text("feat"),
        Reply::Text("parser"),
        Reply::Text("support nested scopes"),
        Reply::Text(""),
        Reply::Flag(false),
        Reply::Flag(false),
    ]);
    let answers = engine()
        .prompt(&mut runner)
        .expect("prompt")
        .expect("not cancelled");

    assert!(!answers.contains(Field::Breaking));
    assert!(!answers.contains(Field::Issues));
    assert_eq!(answers.len(), 6);
    assert_eq!(
        runner.asked,
        vec![
            Field::Type,
            Field::Scope,
            Field::Subject,
            Field::Body,
            Field::IsBreaking,
            Field::IsIssueAffected,
        ]
    );
}

#[test]
fn end_to_end_feature_without_body_or_footer() {
    let engine = engine();
    let mut runner = ScriptedRunner::new([
        Reply::Text("feat"),
        Reply::Text("parser"),
        Reply::Text("support nested scopes"),
        Reply::Text(""),
        Reply::Flag(false),
        Reply::Flag(false),
    ]);

    let mut committed = Vec::new();
    let finished = engine
        .run(&mut runner, |message| {
            committed.push(message.to_string());
            Ok(())
        })
        .expect("run");

    assert!(finished);
    assert_eq!(committed, vec!["feat(parser): support nested scopes\n\n".to_string()]);
}

#[test]
fn end_to_end_with_breaking_change_and_issues() {
    let engine = Engine::new(EngineOptions {
        types: conventional_types(),
        default_issues: Some("PROJ-42".into()),
        compose: ComposeOptions {
            normalize_issues: true,
            ..ComposeOptions::default()
        },
        ..EngineOptions::default()
    })
    .expect("engine");
    let mut runner = ScriptedRunner::new([
        Reply::Text("refactor"),
        Reply::Text(""),
        Reply::Text("split config loader"),
        Reply::Text("Moves parsing into its own module."),
        Reply::Flag(true),
        Reply::Text("BREAKING CHANGE: load() now returns a Result"),
        Reply::Flag(true),
        Reply::Text(""),
    ]);

    let answers = engine
        .prompt(&mut runner)
        .expect("prompt")
        .expect("not cancelled");
    assert_eq!(answers.text(Field::Issues), Some("PROJ-42"));

    let message = engine.compose(&answers).expect("compose");
    assert_eq!(
        message,
        "refactor: split config loader\n\n\
         Moves parsing into its own module.\n\n\
         BREAKING CHANGE: load() now returns a Result\n\n\
         PROJ-42, #PROJ-42"
    );
}

#[test]
fn invalid_answers_are_reprompted_by_the_runner() {
    let mut runner = ScriptedRunner::new([
        Reply::Text("feature"),
        Reply::Text("fix"),
        Reply::Text("Core"),
        Reply::Text("core"),
        Reply::Text("Fix bug"),
        Reply::Text("fix bug"),
        Reply::Text(""),
        Reply::Flag(false),
        Reply::Flag(false),
    ]);
    let answers = engine()
        .prompt(&mut runner)
        .expect("prompt")
        .expect("not cancelled");

    assert_eq!(answers.text(Field::Type), Some("fix"));
    assert_eq!(answers.text(Field::Scope), Some("core"));
    assert_eq!(answers.text(Field::Subject), Some("fix bug"));
    let rejected: Vec<_> = runner.rejections.iter().map(|(f, _)| *f).collect();
    assert_eq!(rejected, vec![Field::Type, Field::Scope, Field::Subject]);
    assert_eq!(
        runner.rejections[2].1,
        "The description must begin with a lowercase character."
    );
}

#[test]
fn defaults_fill_empty_replies() {
    let engine = Engine::new(EngineOptions {
        types: conventional_types(),
        default_type: Some("docs".into()),
        default_scope: Some("readme".into()),
        default_subject: Some("document env defaults".into()),
        ..EngineOptions::default()
    })
    .expect("engine");
    let mut runner = ScriptedRunner::new([
        Reply::Text(""),
        Reply::Text(""),
        Reply::Text(""),
        Reply::Text(""),
        Reply::Flag(false),
        Reply::Flag(false),
    ]);
    let answers = engine
        .prompt(&mut runner)
        .expect("prompt")
        .expect("not cancelled");
    assert_eq!(
        engine.compose(&answers).expect("compose"),
        "docs(readme): document env defaults\n\n"
    );
}

#[test]
fn cancelled_session_never_commits() {
    let engine = engine();
    let mut runner = ScriptedRunner::new([Reply::Text("fix"), Reply::Text("api"), Reply::Cancel]);

    let mut called = false;
    let finished = engine
        .run(&mut runner, |_| {
            called = true;
            Ok(())
        })
        .expect("run");

    assert!(!finished);
    assert!(!called);
    assert_eq!(runner.remaining(), 0);
}

#[test]
fn commit_callback_errors_are_propagated() {
    let engine = engine();
    let mut runner = ScriptedRunner::new([
        Reply::Text("chore"),
        Reply::Text(""),
        Reply::Text("tidy"),
        Reply::Text(""),
        Reply::Flag(false),
        Reply::Flag(false),
    ]);
    let err = engine
        .run(&mut runner, |_| anyhow::bail!("git refused"))
        .expect_err("callback error should surface");
    assert!(err.to_string().contains("git refused"));
}
