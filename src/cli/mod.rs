//! Command-line interface for binderdex, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::{cmd_card, cmd_search, cmd_sets};

/// binderdex - trading card catalog and binder server
#[derive(Parser)]
#[command(name = "binderdex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web API server (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Search the card catalog
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Show one printing with its other printings
    #[command(alias = "c")]
    Card {
        /// Printing ID
        id: String,
    },

    /// List card sets, newest first
    Sets,
}

#[derive(clap::Args, Debug, Default)]
pub struct SearchArgs {
    /// Name text to search for
    pub query: Vec<String>,

    /// common, uncommon, rare or mythic
    #[arg(long)]
    pub rarity: Option<String>,

    /// Set code, e.g. lea
    #[arg(long = "set")]
    pub set_code: Option<String>,

    /// Comma-separated colors, e.g. W,U
    #[arg(long)]
    pub colors: Option<String>,

    /// name or price
    #[arg(long)]
    pub order_by: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    #[arg(long)]
    pub page: Option<String>,
}
