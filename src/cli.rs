//! Command-line interface for Wikiscout
//!
//! Provides argument parsing and subcommand handling for the Wikiscout binary.

use clap::{Parser, Subcommand};

/// Research assistant backend over Gemini and Wikipedia
#[derive(Parser)]
#[command(name = "wikiscout")]
#[command(version)]
#[command(about = "Research assistant backend over Gemini and Wikipedia")]
#[command(
    long_about = "Wikiscout forwards chat messages to a hosted Gemini model and serves \
    Wikipedia-grounded research answers coerced into a fixed JSON schema."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Wikiscout Configuration
# =======================
#
# This file configures the HTTP server, the model and lookup collaborators,
# and observability settings for Wikiscout.
#
# The Gemini API key is NOT configured here: set the GEMINI_API_KEY
# environment variable. The server refuses to start without it.

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "127.0.0.1"

# Port to listen on
port = 8000

# Outbound request timeout in seconds for the model and lookup calls.
# Omit to disable the timeout entirely (the default).
# request_timeout_seconds = 30

[model]
# Gemini model identifier
name = "gemini-1.5-flash"

# Gemini API base URL
base_url = "https://generativelanguage.googleapis.com/v1beta"

[lookup]
# Wikipedia REST API base URL
base_url = "https://en.wikipedia.org/api/rest_v1"

[save]
# Append-only research log written by the save tool
path = "research_output.txt"

[static_files]
# Directory of frontend assets served beneath /. Omit to disable.
# dir = "static"

[observability]
# Default log level (overridden by RUST_LOG when set)
log_level = "info"
"#
}
