//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

use crate::domain::NodeId;

/// Mind-map tree editor: add, label, collapse and position nodes; the map
/// persists locally between invocations
#[derive(Parser, Debug)]
#[command(name = "mindtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a child node under a parent
    Add {
        /// Parent node id
        parent: NodeId,
    },

    /// Delete a node and its entire subtree
    Delete {
        /// Node id
        id: NodeId,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace a node's label
    Edit {
        /// Node id
        id: NodeId,
        /// New label (verbatim, may be empty)
        text: String,
    },

    /// Collapse or expand a node's subtree
    Collapse {
        /// Node id
        id: NodeId,
    },

    /// Move a node to an absolute canvas position
    Move {
        /// Node id
        id: NodeId,
        /// X coordinate
        #[arg(allow_negative_numbers = true)]
        x: f64,
        /// Y coordinate
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Show the visible tree
    Show,

    /// Show tree statistics and storage location
    Info,

    /// Replace the map with a fresh single-root tree
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config and snapshot paths
    Path,
}
