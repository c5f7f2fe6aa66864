//! CLI module
//!
//! Command-line interface for the Canvas MCP server.
//!
//! # Commands
//!
//! - `serve` - Run the MCP server on stdio (default)
//! - `tools` - Print the operation catalogue
//! - `call` - Call one operation
//! - `resources` - List resource URIs
//! - `read` - Read one resource

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
