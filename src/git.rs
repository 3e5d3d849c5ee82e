use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// `git commit` flags that make an empty index acceptable
const STAGING_FLAGS: &[&str] = &["-a", "--all", "--allow-empty", "--amend"];

/// List staged file paths
pub fn list_staged_files() -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["diff", "--staged", "--name-only"])
        .output()
        .context("Failed to run git diff --staged --name-only")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git diff --staged --name-only failed: {stderr}");
    }

    let files = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    Ok(files)
}

/// Whether the forwarded `git commit` args can commit without a staged change
pub fn forwards_staging_flag(extra_args: &[String]) -> bool {
    extra_args
        .iter()
        .any(|arg| STAGING_FLAGS.contains(&arg.as_str()))
}

/// Fail early, before any question is asked, when there is nothing to commit
pub fn ensure_staged_changes(extra_args: &[String]) -> Result<()> {
    if forwards_staging_flag(extra_args) {
        return Ok(());
    }
    let files = list_staged_files()?;
    debug!(staged = files.len(), "checked staged files");
    if files.is_empty() {
        bail!(
            "No staged changes found. Stage files with {} first.",
            colored::Colorize::yellow("git add <files>")
        );
    }
    Ok(())
}

/// Find the git repository root directory
pub fn find_repo_root() -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .stderr(Stdio::null())
        .output()
        .context("Failed to run git rev-parse")?;

    if !output.status.success() {
        bail!("Not in a git repository");
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run `git commit -m "<message>" [extra_args...]`
pub fn run_commit(message: &str, extra_args: &[String], suppress_output: bool) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.args(["commit", "-m", message]);
    cmd.args(extra_args);
    configure_stdio(&mut cmd, suppress_output);
    debug!(?extra_args, "running git commit");
    let status = cmd.status().context("Failed to run git commit")?;

    if !status.success() {
        bail!("git commit exited with status {status}");
    }

    Ok(())
}

fn configure_stdio(cmd: &mut Command, suppress_output: bool) {
    if suppress_output {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }
}
