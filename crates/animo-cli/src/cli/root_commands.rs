use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::EntryCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Build an insight report from stored entries or a records file.
    Analyze(AnalyzeArgs),
    /// Journal entries.
    Entry {
        #[command(subcommand)]
        action: EntryCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Bind address (overrides server.bind).
    #[arg(long)]
    pub bind: Option<String>,
    /// Port (overrides server.port).
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// JSON file with inline records: an array, or an object with `records`.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Analyze this user's stored entries.
    #[arg(long)]
    pub user: Option<String>,
    /// Range start in epoch milliseconds.
    #[arg(long)]
    pub from: Option<i64>,
    /// Range end in epoch milliseconds.
    #[arg(long)]
    pub to: Option<i64>,
}
