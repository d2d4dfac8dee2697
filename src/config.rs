// Server configuration: CLI > env > YAML file (~/.config/taskboard/config.yaml) > defaults

use std::path::{Path, PathBuf};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config file: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
}

/// YAML file layout. Every field is optional so a file can override a subset.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerFileConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
    log_level: Option<String>,
    seed_demo: Option<bool>,
}

/// CLI arguments for the server.
#[derive(clap::Parser, Debug, Default)]
#[command(name = "taskboard")]
#[command(version, about = "Task board - in-memory task tracking over a REST API")]
pub struct CliArgs {
    /// Address to listen on
    #[arg(short, long, env = "TASKBOARD_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskboard/config.yaml`)
    #[arg(short, long, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, env = "TASKBOARD_LOG")]
    pub log_level: Option<String>,

    /// Populate the store with sample tasks at start-up (`--seed-demo=false` overrides the file)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub seed_demo: Option<bool>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub log_level: String,
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".to_string(),
            log_level: "info".to_string(),
            seed_demo: false,
        }
    }
}

impl Config {
    /// Load configuration by merging CLI args, env vars, and the YAML file.
    ///
    /// An explicit `--config` path must exist. The default path is optional.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            log_level: cli
                .log_level
                .clone()
                .or_else(|| file.server.log_level.clone())
                .unwrap_or(defaults.log_level),
            seed_demo: cli
                .seed_demo
                .or(file.server.seed_demo)
                .unwrap_or(defaults.seed_demo),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskboard").join("config.yaml"))
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        return parse(&contents);
    }

    let Some(path) = default_config_path() else {
        return Ok(ConfigFile::default());
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => parse(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}

// An empty YAML document parses as null, not as an empty mapping.
fn parse(contents: &str) -> Result<ConfigFile, ConfigError> {
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}
