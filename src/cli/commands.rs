//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MCP server for the Canvas LMS API
#[derive(Parser, Debug)]
#[command(name = "canvas-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API token (overrides CANVAS_API_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Canvas domain, e.g. school.instructure.com (overrides CANVAS_DOMAIN)
    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// Full API base URL (overrides CANVAS_BASE_URL and the domain)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Maximum pages followed by one fetch
    #[arg(long, global = true)]
    pub max_pages: Option<u32>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// Print the operation catalogue as JSON
    Tools,

    /// Call one operation and print its result
    Call {
        /// Operation name, e.g. canvas_list_courses
        name: String,

        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// List every resource URI
    Resources,

    /// Read one resource, e.g. course://42
    Read {
        /// Resource URI
        uri: String,
    },
}
