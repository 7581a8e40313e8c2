//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// townboard - a public listing of local events
#[derive(Debug, Parser)]
#[command(name = "townboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "TOWNBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the events database (overrides configuration)
    #[arg(long, env = "TOWNBOARD_DATABASE")]
    pub database: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List upcoming events
    List,

    /// Show one event
    Show {
        /// Event id
        id: i64,
    },

    /// Event administration
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Administrative actions.
#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// All events, newest first
    List {
        /// Case-insensitive substring filter over title and location
        #[arg(long, short)]
        filter: Option<String>,
    },

    /// Add a new event
    Add(AddArgs),

    /// Edit an existing event
    Edit {
        /// Event id
        id: i64,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Flip an event's visibility
    Toggle {
        /// Event id
        id: i64,
    },

    /// Delete an event permanently
    Delete {
        /// Event id
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Fields for `admin add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Event title
    #[arg(long)]
    pub title: String,

    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Start time (HH:MM); omit for an all-day event
    #[arg(long)]
    pub time: Option<String>,

    /// Venue or address
    #[arg(long)]
    pub location: String,

    /// Full description
    #[arg(long)]
    pub description: String,

    /// Absolute HTTP(S) image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Create hidden from the public listing
    #[arg(long)]
    pub inactive: bool,
}

/// Field overrides for `admin edit`; unset flags keep the stored value.
#[derive(Debug, Default, Args)]
pub struct EditArgs {
    /// Event title
    #[arg(long)]
    pub title: Option<String>,

    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Remove the start time (make the event all-day)
    #[arg(long, conflicts_with = "time")]
    pub clear_time: bool,

    /// Venue or address
    #[arg(long)]
    pub location: Option<String>,

    /// Full description
    #[arg(long)]
    pub description: Option<String>,

    /// Absolute HTTP(S) image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Remove the image URL
    #[arg(long, conflicts_with = "image_url")]
    pub clear_image_url: bool,

    /// Set visibility (true or false)
    #[arg(long)]
    pub active: Option<bool>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
