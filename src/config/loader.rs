use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{CommandSpec, SubmitMode};

pub const CONFIG_ENV: &str = "REMEMBERED_CONFIG";
pub const DEFAULT_SESSION_NAME: &str = "remembered";
pub const DEFAULT_WINDOW_PREFIX: &str = "run";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default = "default_true")]
    pub auto_execute: bool,
    #[serde(default)]
    pub confirm_each: bool,
    #[serde(default = "default_session_name")]
    pub session_name: String,
    #[serde(default = "default_window_prefix")]
    pub window_prefix: String,
    #[serde(default = "default_true")]
    pub mouse: bool,
}

fn default_true() -> bool {
    true
}

fn default_session_name() -> String {
    DEFAULT_SESSION_NAME.to_string()
}

fn default_window_prefix() -> String {
    DEFAULT_WINDOW_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            auto_execute: true,
            confirm_each: false,
            session_name: default_session_name(),
            window_prefix: default_window_prefix(),
            mouse: true,
        }
    }
}

impl Config {
    /// Reads the JSON config. Unlike most settings files a missing one is an
    /// error: without commands there is nothing to launch.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path.unwrap_or_else(Self::default_config_path);

        if !path.exists() {
            bail!(
                "Config file not found: {}. Run 'remembered init' to create one.",
                path.display()
            );
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("JSON parse error in config file: {}", path.display()))
    }

    pub fn default_config_path() -> PathBuf {
        if let Some(config_path) = std::env::var_os(CONFIG_ENV) {
            PathBuf::from(config_path)
        } else {
            Self::home_config_path(dirs::home_dir())
        }
    }

    /// `~/.config/terminator/commands.json` on every platform, macOS included.
    fn home_config_path(home: Option<PathBuf>) -> PathBuf {
        home.unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("terminator")
            .join("commands.json")
    }

    /// Starter config written by `remembered init`.
    pub fn example() -> Self {
        Self {
            commands: vec![
                "htop".to_string(),
                "tail -f /var/log/syslog".to_string(),
                "cd ~/projects && git status".to_string(),
            ],
            ..Self::default()
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn with_session_name(mut self, session_name: String) -> Self {
        self.session_name = session_name;
        self
    }

    pub fn submit_mode(&self) -> SubmitMode {
        SubmitMode::from_flags(self.auto_execute, self.confirm_each)
    }

    /// Configured commands in pane order.
    pub fn command_specs(&self) -> Vec<CommandSpec> {
        let mode = self.submit_mode();
        self.commands
            .iter()
            .map(|text| CommandSpec::new(text.clone(), mode))
            .collect()
    }
}
