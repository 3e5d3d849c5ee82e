use anyhow::{Context, Result};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cz_conventional::cli::{self, Command};
use cz_conventional::config::AppConfig;
use cz_conventional::runner::InquireRunner;
use cz_conventional::{git, ui, Engine};

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = cli::parse();

    match &cli.command {
        Some(Command::Config) => cli::interactive_config()?,
        Some(Command::Types) => {
            let cfg = AppConfig::load()?;
            cli::print_types(&cfg);
        }
        None => {
            let cfg = AppConfig::load()?;
            let engine = Engine::new(cfg.engine_options())?;

            if !cli.dry_run {
                git::ensure_staged_changes(&cli.extra_args)?;
            }

            ui::print_banner(&engine.options().compose);

            let mut runner = InquireRunner::new();
            let finished = engine.run(&mut runner, |message| {
                if cli.dry_run {
                    println!("{message}");
                    return Ok(());
                }
                commit_message(message, &cfg, &cli)
            })?;
            if !finished {
                println!("{}", "Cancelled.".dimmed());
            }
        }
    }

    Ok(())
}

/// Commit callback: optional review, then `git commit`.
fn commit_message(message: &str, cfg: &AppConfig, cli: &cli::Cli) -> Result<()> {
    let message = if cfg.review_commit && !cli.no_review {
        match ui::review_message(message.to_string())? {
            Some(message) => message,
            None => {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }
        }
    } else {
        message.to_string()
    };

    git::run_commit(&message, &cli.extra_args, cfg.suppress_tool_output)
        .context("git commit failed")
}
