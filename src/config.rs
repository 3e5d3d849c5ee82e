use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::{conventional_types, TypeEntry};
use crate::compose::ComposeOptions;
use crate::engine::EngineOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub default_type: String,
    #[serde(default)]
    pub default_scope: String,
    #[serde(default)]
    pub default_subject: String,
    #[serde(default)]
    pub default_body: String,
    #[serde(default)]
    pub default_issues: String,
    /// Fixed scope list; empty means free-text scope.
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub normalize_issues: bool,
    #[serde(default = "default_true")]
    pub review_commit: bool,
    #[serde(default)]
    pub suppress_tool_output: bool,
    /// Custom type catalog; empty means the built-in conventional types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeEntry>,
}

pub fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_type: String::new(),
            default_scope: String::new(),
            default_subject: String::new(),
            default_body: String::new(),
            default_issues: String::new(),
            scopes: Vec::new(),
            normalize_issues: false,
            review_commit: true,
            suppress_tool_output: false,
            types: Vec::new(),
        }
    }
}

/// CZ_ env var suffixes understood by the loader
const ENV_SUFFIXES: &[&str] = &[
    "TYPE",
    "SCOPE",
    "SUBJECT",
    "BODY",
    "ISSUES",
    "SCOPES",
    "NORMALIZE_ISSUES",
    "REVIEW_COMMIT",
    "SUPPRESS_TOOL_OUTPUT",
];

fn parse_bool(val: &str) -> bool {
    let val = val.trim();
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn non_empty(val: &str) -> Option<String> {
    if val.trim().is_empty() {
        None
    } else {
        Some(val.to_string())
    }
}

impl AppConfig {
    /// Load config with layered resolution: defaults → global TOML → local .env → env vars
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();

        // Layer 1: Global TOML
        if let Some(path) = global_config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let file_cfg: AppConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                debug!(path = %path.display(), "loaded global config");
                cfg.merge_from(&file_cfg);
            }
        }

        // Layer 2: Local .env (in git repo root)
        if let Ok(root) = crate::git::find_repo_root() {
            let env_path = PathBuf::from(&root).join(".env");
            if env_path.exists() {
                let env_map = parse_dotenv(&env_path)?;
                debug!(path = %env_path.display(), "loaded local .env");
                cfg.apply_env_map(&env_map);
            }
        }

        // Layer 3: Actual environment variables
        let mut env_map = HashMap::new();
        for suffix in ENV_SUFFIXES {
            let key = format!("CZ_{suffix}");
            if let Ok(val) = std::env::var(&key) {
                env_map.insert(key, val);
            }
        }
        cfg.apply_env_map(&env_map);

        Ok(cfg)
    }

    fn merge_from(&mut self, other: &AppConfig) {
        if !other.default_type.is_empty() {
            self.default_type = other.default_type.clone();
        }
        if !other.default_scope.is_empty() {
            self.default_scope = other.default_scope.clone();
        }
        if !other.default_subject.is_empty() {
            self.default_subject = other.default_subject.clone();
        }
        if !other.default_body.is_empty() {
            self.default_body = other.default_body.clone();
        }
        if !other.default_issues.is_empty() {
            self.default_issues = other.default_issues.clone();
        }
        if !other.scopes.is_empty() {
            self.scopes = other.scopes.clone();
        }
        if !other.types.is_empty() {
            self.types = other.types.clone();
        }
        self.normalize_issues = other.normalize_issues;
        self.review_commit = other.review_commit;
        self.suppress_tool_output = other.suppress_tool_output;
    }

    fn apply_env_map(&mut self, map: &HashMap<String, String>) {
        for suffix in ENV_SUFFIXES {
            if let Some(val) = map.get(&format!("CZ_{suffix}")) {
                // Unknown suffixes cannot appear here
                let _ = self.set_field(suffix, val);
            }
        }
    }

    /// Options for the message engine. Falls back to the built-in type catalog.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            types: if self.types.is_empty() {
                conventional_types()
            } else {
                self.types.clone()
            },
            default_type: non_empty(&self.default_type),
            scopes: if self.scopes.is_empty() {
                None
            } else {
                Some(self.scopes.clone())
            },
            default_scope: non_empty(&self.default_scope),
            default_subject: non_empty(&self.default_subject),
            default_body: non_empty(&self.default_body),
            default_issues: non_empty(&self.default_issues),
            compose: ComposeOptions {
                normalize_issues: self.normalize_issues,
                ..ComposeOptions::default()
            },
        }
    }

    /// Save to global TOML config file
    pub fn save_global(&self) -> Result<()> {
        let path = global_config_path().context("Could not determine global config directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Save to local .env file in the git repo root. The type catalog stays global-only.
    pub fn save_local(&self) -> Result<()> {
        let root = crate::git::find_repo_root().context("Not in a git repository")?;
        let env_path = PathBuf::from(&root).join(".env");

        let mut lines = Vec::new();
        for (key, val) in [
            ("CZ_TYPE", &self.default_type),
            ("CZ_SCOPE", &self.default_scope),
            ("CZ_SUBJECT", &self.default_subject),
            ("CZ_BODY", &self.default_body),
            ("CZ_ISSUES", &self.default_issues),
        ] {
            if !val.is_empty() {
                lines.push(format!("{key}={}", quote_env_value(val)));
            }
        }
        if !self.scopes.is_empty() {
            lines.push(format!("CZ_SCOPES={}", self.scopes.join(",")));
        }
        lines.push(format!(
            "CZ_NORMALIZE_ISSUES={}",
            if self.normalize_issues { "1" } else { "0" }
        ));
        lines.push(format!(
            "CZ_REVIEW_COMMIT={}",
            if self.review_commit { "1" } else { "0" }
        ));
        lines.push(format!(
            "CZ_SUPPRESS_TOOL_OUTPUT={}",
            if self.suppress_tool_output { "1" } else { "0" }
        ));

        std::fs::write(&env_path, lines.join("\n") + "\n")
            .with_context(|| format!("Failed to write {}", env_path.display()))?;
        Ok(())
    }

    /// Get all fields as (display_name, env_suffix, current_value) tuples
    pub fn fields_display(&self) -> Vec<(&'static str, &'static str, String)> {
        let or_unset = |val: &str| {
            if val.is_empty() {
                "(not set)".to_string()
            } else {
                val.to_string()
            }
        };
        let toggle = |on: bool| String::from(if on { "enabled" } else { "disabled" });

        vec![
            ("Default Type", "TYPE", or_unset(&self.default_type)),
            ("Default Scope", "SCOPE", or_unset(&self.default_scope)),
            ("Default Subject", "SUBJECT", or_unset(&self.default_subject)),
            ("Default Body", "BODY", or_unset(&self.default_body)),
            ("Default Issues", "ISSUES", or_unset(&self.default_issues)),
            (
                "Scopes",
                "SCOPES",
                if self.scopes.is_empty() {
                    "(free text)".into()
                } else {
                    self.scopes.join(", ")
                },
            ),
            (
                "Normalize Issues",
                "NORMALIZE_ISSUES",
                toggle(self.normalize_issues),
            ),
            ("Review Commit", "REVIEW_COMMIT", toggle(self.review_commit)),
            (
                "Suppress Tool Output",
                "SUPPRESS_TOOL_OUTPUT",
                toggle(self.suppress_tool_output),
            ),
        ]
    }

    /// Set a field by its env suffix
    pub fn set_field(&mut self, suffix: &str, value: &str) -> Result<()> {
        match suffix {
            "TYPE" => self.default_type = value.trim().into(),
            "SCOPE" => self.default_scope = value.trim().into(),
            "SUBJECT" => self.default_subject = value.into(),
            "BODY" => self.default_body = value.into(),
            "ISSUES" => self.default_issues = value.into(),
            "SCOPES" => self.scopes = parse_list(value),
            "NORMALIZE_ISSUES" => self.normalize_issues = parse_bool(value),
            "REVIEW_COMMIT" => self.review_commit = parse_bool(value),
            "SUPPRESS_TOOL_OUTPUT" => self.suppress_tool_output = parse_bool(value),
            _ => anyhow::bail!("Unknown config field '{suffix}'"),
        }
        Ok(())
    }
}

/// Global config file path
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(override_dir) = std::env::var_os("CZ_CONFIG_HOME") {
        let override_path = PathBuf::from(override_dir);
        if !override_path.as_os_str().is_empty() {
            return Some(override_path.join("cz").join("config.toml"));
        }
    }
    dirs::config_dir().map(|d| d.join("cz").join("config.toml"))
}

/// Get description for a field by its env suffix
pub fn field_description(suffix: &str) -> &'static str {
    match suffix {
        "TYPE" => "Commit type preselected in the type list (e.g. feat)",
        "SCOPE" => "Scope prefilled in the scope question",
        "SUBJECT" => "Subject prefilled in the subject question",
        "BODY" => "Body prefilled in the body question",
        "ISSUES" => "Issue references prefilled; also makes the issues question default to yes",
        "SCOPES" => "Comma-separated list of allowed scopes (empty for free text)",
        "NORMALIZE_ISSUES" => "Add a #KEY-123 reference next to the first KEY-123 ticket",
        "REVIEW_COMMIT" => "Review and approve commit message before creating commit",
        "SUPPRESS_TOOL_OUTPUT" => "Hide git command output when enabled",
        _ => "",
    }
}

/// Quote a value so `parse_dotenv` reads it back unchanged.
fn quote_env_value(val: &str) -> String {
    let plain = !val
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '#' | '$' | '\\'));
    if plain {
        val.to_string()
    } else if !val.contains('\'') {
        format!("'{val}'")
    } else {
        let escaped = val
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('$', "\\$");
        format!("\"{escaped}\"")
    }
}

fn parse_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut map = HashMap::new();
    for item in iter {
        let (key, val) = item.with_context(|| format!("Failed to parse {}", path.display()))?;
        map.insert(key, val);
    }
    Ok(map)
}
