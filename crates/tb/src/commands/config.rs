//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/taskboard/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use taskboard_core::SortKey;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable that overrides the config file path.
pub const CONFIG_ENV: &str = "TASKBOARD_CONFIG";

/// Keys accepted by `config set`.
const VALID_KEYS: &str = "data_dir, output.color, output.date_format, list.sort, list.limit";

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory holding the task store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Defaults for the list command.
    #[serde(default)]
    pub list: ListConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data_dir: None,
            output: OutputConfig::default(),
            list: ListConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Due date rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
}

/// List command defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Sort order used when neither `--sort` nor a saved sort applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,

    /// Default row limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// How due dates are rendered in tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// "Due Today", "Overdue", "Due Dec 15, 2025".
    #[default]
    Relative,
    /// The raw `YYYY-MM-DD` date.
    Iso,
}

impl DateFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "relative" => Ok(DateFormat::Relative),
            "iso" => Ok(DateFormat::Iso),
            _ => Err(CommandError::Config(format!(
                "Invalid date_format value '{s}'. Valid values: relative, iso"
            ))),
        }
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/taskboard/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("taskboard"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("taskboard"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    Ok(get_config_dir()?.join("config.toml"))
}

/// Loads the configuration from disk. A missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {e}")))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {e}")))?;

    Ok(migrate_config(config))
}

/// Migrates config to the current version.
fn migrate_config(mut config: Config) -> Config {
    if config.version != CONFIG_VERSION {
        tracing::debug!(from = config.version, to = CONFIG_VERSION, "migrating config");
    }
    config.version = CONFIG_VERSION;
    config
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<PathBuf> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {e}"))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {e}")))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {e}")))?;

    Ok(path)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    let header = "Configuration";
    if ctx.use_colors {
        println!("{}\n", header.green().bold());
    } else {
        println!("{header}\n");
    }

    println!("File: {}", path.display());
    println!("Exists: {}\n", path.exists());

    if !path.exists() {
        println!("(No config file exists. Run 'tb config set <key> <value>' to create one.)");
        return Ok(());
    }

    if let Some(ref dir) = config.data_dir {
        println!("  data_dir: {}", dir.display());
    }

    println!("\n[output]");
    if let Some(color) = config.output.color {
        println!("  color: {color}");
    }
    if let Some(format) = config.output.date_format {
        println!("  date_format: {}", date_format_name(format));
    }

    println!("\n[list]");
    if let Some(sort) = config.list.sort {
        println!("  sort: {sort}");
    }
    if let Some(limit) = config.list.limit {
        println!("  limit: {limit}");
    }

    Ok(())
}

fn date_format_name(format: DateFormat) -> &'static str {
    match format {
        DateFormat::Relative => "relative",
        DateFormat::Iso => "iso",
    }
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies one `key = value` assignment to `config`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => config.data_dir = Some(PathBuf::from(value)),
        "output.color" => config.output.color = Some(parse_bool(value)?),
        "output.date_format" => config.output.date_format = Some(DateFormat::parse(value)?),
        "list.sort" => config.list.sort = Some(value.parse::<SortKey>()?),
        "list.limit" => {
            let limit = value.parse::<usize>().map_err(|_| {
                CommandError::Config(format!("Invalid limit '{value}'. Expected a number"))
            })?;
            config.list.limit = Some(limit);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{key}'. Valid keys: {VALID_KEYS}"
            )))
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    apply_setting(&mut config, &opts.key, &opts.value)?;
    let path = save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{s}'. Use true/false, yes/no, 1/0, or on/off"
        ))),
    }
}
