//! CLI Tooling
//!
//! Command-line adapter over the catalog. Parses arguments, calls one catalog operation per
//! command and renders the result as text or JSON.

use crate::agent::AgentDraft;
use crate::catalog::AgentCatalog;
use crate::config::{AwareConfig, ConfigLoader};
use crate::error::ApiError;
use crate::tooling::format::{format_agent_list_text, format_agent_text};
use crate::tooling::tools::ToolBridge;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Aware CLI - catalog of discoverable agents
#[derive(Parser)]
#[command(name = "aware")]
#[command(about = "Catalog of discoverable agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of the loaded configuration. `--log-file` is passed to
    /// `init_logging` directly so it outranks `AWARE_LOG_FILE`.
    pub fn apply_logging_overrides(&self, config: &mut AwareConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search, show and add agents
    Agents {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Invoke catalog tools with JSON arguments
    Tool {
        #[command(subcommand)]
        command: ToolCommands,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// List agents, optionally filtered
    List {
        /// Substring matched against name and description
        #[arg(long)]
        query: Option<String>,
        /// Comma-separated tags; every tag must match
        #[arg(long)]
        tags: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one agent
    Show {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add an agent
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ToolCommands {
    /// Print tool definitions
    List,
    /// Call a tool
    Call {
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

/// CLI context: the catalog and tool bridge opened from configuration.
pub struct CliContext {
    catalog: AgentCatalog,
    tools: ToolBridge,
}

impl CliContext {
    /// Load configuration for `workspace_root`, from `config_path` when given.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<AwareConfig, ApiError> {
        match config_path {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(workspace_root),
        }
    }

    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Self::load_config(&workspace_root, config_path.as_deref())?;
        Self::from_config(workspace_root, &config)
    }

    pub fn from_config(workspace_root: PathBuf, config: &AwareConfig) -> Result<Self, ApiError> {
        let store = config.storage.open_store(&workspace_root)?;
        let catalog = AgentCatalog::new(store);
        let tools = ToolBridge::new(catalog.clone());
        Ok(Self { catalog, tools })
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Agents { command } => self.execute_agents(command),
            Commands::Tool { command } => self.execute_tool(command),
        }
    }

    fn execute_agents(&self, command: &AgentCommands) -> Result<String, ApiError> {
        match command {
            AgentCommands::List {
                query,
                tags,
                format,
            } => {
                let json = parse_format(format)?;
                let agents = self.catalog.search(query.as_deref(), tags.as_deref())?;
                if json {
                    to_json(&agents)
                } else {
                    Ok(format_agent_list_text(&agents))
                }
            }
            AgentCommands::Show { id, format } => {
                let json = parse_format(format)?;
                let agent = self.catalog.get_by_id(id)?;
                if json {
                    to_json(&agent)
                } else {
                    Ok(format_agent_text(&agent))
                }
            }
            AgentCommands::Add {
                name,
                description,
                tags,
                format,
            } => {
                let json = parse_format(format)?;
                let created = self.catalog.create(AgentDraft::new(
                    name.as_str(),
                    description.as_str(),
                    tags.iter().cloned(),
                ))?;
                info!(agent_id = %created.id, "Agent added");
                if json {
                    to_json(&created)
                } else {
                    Ok(format!("Agent added: {} (id {})", created.name, created.id))
                }
            }
        }
    }

    fn execute_tool(&self, command: &ToolCommands) -> Result<String, ApiError> {
        match command {
            ToolCommands::List => to_json(&ToolBridge::definitions()),
            ToolCommands::Call { name, args } => {
                let args: serde_json::Value = serde_json::from_str(args).map_err(|e| {
                    ApiError::ValidationError(format!("Tool arguments are not valid JSON: {}", e))
                })?;
                let output = self.tools.call(name, &args)?;
                to_json(&output)
            }
        }
    }
}

fn parse_format(format: &str) -> Result<bool, ApiError> {
    match format {
        "json" => Ok(true),
        "text" => Ok(false),
        other => Err(ApiError::ConfigError(format!(
            "Invalid format: {}. Must be 'text' or 'json'",
            other
        ))),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}
