//! Installer configuration
//!
//! `restack.toml` describes the environment being updated, where the source
//! tree keeps its deployable pieces, and the commands that carry out each
//! kind of update step. Unknown keys are surfaced as warnings rather than
//! errors so a newer config keeps working with an older binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RestackError, RestackResult};
use crate::models::Environment;

/// Top-level installer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub commands: CommandsConfig,
}

/// Where the source tree keeps its deployable pieces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Directory of shared infrastructure templates, relative to the source root
    #[serde(default = "default_resources_dir")]
    pub resources_dir: String,

    /// Deployed-parameter snapshot file, relative to the source root
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            resources_dir: default_resources_dir(),
            snapshot_file: default_snapshot_file(),
        }
    }
}

fn default_resources_dir() -> String {
    "resources".to_string()
}

fn default_snapshot_file() -> String {
    ".restack/deployed.json".to_string()
}

/// Commands executed per update-step kind.
///
/// Each command runs through the shell with `RESTACK_*` environment
/// variables carrying the step's context. A step kind with no command is
/// skipped at execution time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommandsConfig {
    #[serde(default)]
    pub client: Option<String>,

    #[serde(default)]
    pub function: Option<String>,

    #[serde(default)]
    pub service: Option<String>,

    #[serde(default)]
    pub custom_resource: Option<String>,

    #[serde(default)]
    pub stack: Option<String>,
}

/// Non-fatal configuration warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> RestackResult<Config> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys)
    pub fn load_with_warnings(path: &Path) -> RestackResult<(Config, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Config = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| RestackError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    line: find_line_number(&content, &key),
                    key,
                    file: path.to_path_buf(),
                }
            })
            .collect();

        Ok((with_env_overrides(config), warnings))
    }

    /// Load from the source root's config, the user config, or defaults
    pub fn load_or_default(source_root: &Path) -> (Config, Vec<ConfigWarning>) {
        let project_config = source_root.join("restack.toml");
        if project_config.exists() {
            if let Ok(loaded) = Self::load_with_warnings(&project_config) {
                return loaded;
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("restack/config.toml");
            if user_config.exists() {
                if let Ok(loaded) = Self::load_with_warnings(&user_config) {
                    return loaded;
                }
            }
        }

        (with_env_overrides(Config::default()), Vec::new())
    }
}

/// Apply `RESTACK_*` environment overrides on top of file values
fn with_env_overrides(mut config: Config) -> Config {
    if let Ok(name) = std::env::var("RESTACK_ENVIRONMENT") {
        if !name.is_empty() {
            config.environment.name = name;
        }
    }
    if let Ok(account_id) = std::env::var("RESTACK_ACCOUNT_ID") {
        if !account_id.is_empty() {
            config.environment.account_id = Some(account_id);
        }
    }
    if let Ok(region) = std::env::var("RESTACK_REGION") {
        if !region.is_empty() {
            config.environment.region = Some(region);
        }
    }
    config
}

/// Best-effort line lookup for warning messages
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with(key)
                && trimmed[key.len()..]
                    .trim_start()
                    .starts_with(['=', '.'])
        })
        .map(|i| i + 1)
}
