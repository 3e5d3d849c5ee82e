use std::fmt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use inquire::{Select, Text};

use crate::catalog::build_choices;
use crate::config::{field_description, AppConfig};

#[derive(Parser, Debug)]
#[command(
    name = "cz",
    about = "Build a conventional commit message interactively",
    version,
    after_help = "Any arguments after `cz` (without a subcommand) are forwarded to `git commit`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the composed message without creating a commit
    #[arg(long)]
    pub dry_run: bool,

    /// Commit right away without the review step
    #[arg(long)]
    pub no_review: bool,

    /// Extra arguments forwarded to `git commit`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open interactive configuration editor
    Config,
    /// List the commit types offered by the type question
    Types,
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// Print the aligned type list exactly as the type question shows it
pub fn print_types(cfg: &AppConfig) {
    let options = cfg.engine_options();
    for choice in build_choices(&options.types) {
        println!("{choice}");
    }
}

enum MenuEntry {
    Field {
        display_name: &'static str,
        suffix: &'static str,
        value: String,
    },
    SaveGlobal,
    SaveLocal,
    Exit,
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuEntry::Field {
                display_name,
                value,
                ..
            } => write!(f, "{:<22} {}", display_name, value.dimmed()),
            MenuEntry::SaveGlobal => write!(f, "{}", "Save globally & Exit".green()),
            MenuEntry::SaveLocal => write!(f, "{}", "Save to repo .env & Exit".green()),
            MenuEntry::Exit => write!(f, "{}", "Exit without saving".red()),
        }
    }
}

pub fn interactive_config() -> Result<()> {
    let mut cfg = AppConfig::load()?;

    println!("\n{}  configuration\n", "cz".cyan().bold());

    loop {
        let mut entries: Vec<MenuEntry> = cfg
            .fields_display()
            .into_iter()
            .map(|(display_name, suffix, value)| MenuEntry::Field {
                display_name,
                suffix,
                value,
            })
            .collect();
        entries.push(MenuEntry::SaveGlobal);
        entries.push(MenuEntry::SaveLocal);
        entries.push(MenuEntry::Exit);

        let selection = match Select::new("Edit a setting:", entries)
            .with_page_size(14)
            .prompt()
        {
            Ok(s) => s,
            Err(_) => break,
        };

        match selection {
            MenuEntry::SaveGlobal => {
                cfg.save_global()?;
                let path = crate::config::global_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                println!("\n{} Saved to {}", "done!".green().bold(), path.dimmed());
                break;
            }
            MenuEntry::SaveLocal => {
                cfg.save_local()?;
                println!("\n{} Saved to {}", "done!".green().bold(), ".env".dimmed());
                break;
            }
            MenuEntry::Exit => {
                println!("{}", "Cancelled.".dimmed());
                break;
            }
            MenuEntry::Field { suffix, .. } => {
                if let Some(val) = edit_field(suffix, &cfg) {
                    if let Err(err) = cfg.set_field(suffix, &val) {
                        println!("  {} {}", "error:".red().bold(), err);
                    }
                }
            }
        }
    }

    Ok(())
}

fn toggle(prompt: &str) -> Option<String> {
    Select::new(prompt, vec!["enabled", "disabled"])
        .prompt()
        .ok()
        .map(|v| if v == "enabled" { "1" } else { "0" }.to_string())
}

fn edit_field(suffix: &str, cfg: &AppConfig) -> Option<String> {
    match suffix {
        "TYPE" => {
            let options = cfg.engine_options();
            let mut keys: Vec<String> = options.types.into_iter().map(|t| t.key).collect();
            keys.insert(0, "(none)".to_string());
            match Select::new("Default type:", keys).prompt() {
                Ok(v) if v == "(none)" => Some(String::new()),
                Ok(v) => Some(v),
                Err(_) => None,
            }
        }
        "NORMALIZE_ISSUES" => toggle("Normalize issue references:"),
        "REVIEW_COMMIT" => toggle("Review commit before confirming:"),
        "SUPPRESS_TOOL_OUTPUT" => toggle("Suppress git command output:"),
        "SCOPES" => Text::new("Allowed scopes:")
            .with_default(&cfg.scopes.join(","))
            .with_help_message(field_description(suffix))
            .prompt()
            .ok(),
        _ => {
            let fields = cfg.fields_display();
            let (name, _, _) = fields.iter().find(|(_, s, _)| *s == suffix)?;
            let current = match suffix {
                "SCOPE" => cfg.default_scope.as_str(),
                "SUBJECT" => cfg.default_subject.as_str(),
                "BODY" => cfg.default_body.as_str(),
                "ISSUES" => cfg.default_issues.as_str(),
                _ => "",
            };
            let prompt_text = format!("{}:", name);
            Text::new(&prompt_text)
                .with_default(current)
                .with_help_message(field_description(suffix))
                .prompt()
                .ok()
        }
    }
}
