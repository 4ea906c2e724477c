use crate::error::{TransError, TransResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which argument list of the external tool to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandVariant {
    /// Selection differs from the previously translated one
    FirstLookup,
    /// Same selection translated twice in a row
    Repeat,
    /// Gapped sentence context
    Gapped,
}

/// External translation tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program looked up on PATH
    pub program: String,
    pub first_lookup_args: Vec<String>,
    pub repeat_args: Vec<String>,
    pub gapped_args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "trans".to_string(),
            first_lookup_args: vec!["-brief".to_string()],
            repeat_args: Vec::new(),
            gapped_args: vec!["-brief".to_string()],
        }
    }
}

impl ToolConfig {
    /// Resolve the program and arguments for a variant
    pub fn command(&self, variant: CommandVariant) -> ToolCommand {
        let args = match variant {
            CommandVariant::FirstLookup => &self.first_lookup_args,
            CommandVariant::Repeat => &self.repeat_args,
            CommandVariant::Gapped => &self.gapped_args,
        };
        ToolCommand {
            program: self.program.clone(),
            args: args.clone(),
        }
    }
}

/// A fully resolved external command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tool: ToolConfig,

    /// Longest selection translated automatically after a mouse drag
    pub max_selection_length: usize,

    /// Characters kept on each side of the gapped word
    pub max_gap_context: usize,

    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: ToolConfig::default(),
            max_selection_length: 60,
            max_gap_context: 100,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> TransResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path.
    ///
    /// A missing file yields the defaults. A corrupt file is moved aside to
    /// `config.json.corrupt` and the defaults are used instead.
    pub fn load_from(path: &Path) -> TransResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = match serde_json::from_str::<Self>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                return Ok(Self::default());
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> TransResult<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> TransResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> TransResult<()> {
        if self.tool.program.trim().is_empty() {
            return Err(TransError::Config(
                "tool.program must name an executable".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("transtip")
        .join("config.json")
}
