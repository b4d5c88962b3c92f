//! Tooling & Integration Layer
//!
//! Adapters that put the catalog in front of users and automated clients: the CLI and the
//! tool bridge.

pub mod cli;
pub mod format;
pub mod tools;

pub use cli::{Cli, CliContext, Commands};
pub use tools::{ToolBridge, ToolDefinition, ToolOutput};
