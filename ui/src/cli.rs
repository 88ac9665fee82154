use clap::{Parser, Subcommand};
use engine::selector::Direction;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "schemr",
    version,
    about = "Browse, preview, favorite and cycle editor color schemes"
)]
pub struct Cli {
    /// Configuration file layered over the defaults and the user config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List available color schemes
    List {
        /// Only favorited schemes
        #[arg(long)]
        favorites: bool,
        /// Print the catalog entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the active color scheme
    Current {
        /// Per-syntax scope, e.g. Python
        #[arg(long, value_name = "NAME")]
        syntax: Option<String>,
    },

    /// Switch to the next, previous or a random color scheme
    Cycle {
        /// next, prev or rand
        direction: Direction,
        /// Only cycle through favorites
        #[arg(long)]
        favorites: bool,
        /// Only schemes whose name contains this text
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
        #[arg(long, value_name = "NAME")]
        syntax: Option<String>,
    },

    /// Add the active color scheme to the favorites
    Favorite,

    /// Remove the active color scheme from the favorites
    Unfavorite,

    /// Choose a color scheme interactively
    Pick {
        #[arg(long)]
        favorites: bool,
        #[arg(long, value_name = "NAME")]
        syntax: Option<String>,
        /// Do not apply schemes while browsing
        #[arg(long)]
        no_preview: bool,
    },

    /// Remove the color scheme set for a syntax, falling back to the global one
    Reset {
        #[arg(long, value_name = "NAME")]
        syntax: String,
    },

    /// Create the config directory with a default config.toml
    Init,
}
