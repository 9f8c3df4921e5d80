use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use tagseal_core::VERSION;

/// Tagseal - client-side protection for tag lists stored on untrusted servers
#[derive(Parser)]
#[command(name = "tagseal")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "TAGSEAL_CONFIG")]
    pub config: Option<String>,

    /// Path to the item file (overrides the config)
    #[arg(long, global = true, env = "TAGSEAL_ITEMS")]
    pub items: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable interactive prompts (missing passwords count as empty)
    #[arg(long, global = true)]
    pub no_input: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Salt for key derivation (random when omitted)
    #[arg(long)]
    pub salt: Option<String>,

    /// Password used while the master password field is empty
    #[arg(long, env = "TAGSEAL_DEFAULT_PASSWORD", default_value = "")]
    pub default_password: String,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config and an empty item file
    Init(InitArgs),

    /// Decrypt and list items
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add tags (sealed under the current password)
    Add {
        #[arg(value_name = "TAG", required = true)]
        tags: Vec<String>,
    },

    /// Remove items by index
    Remove {
        #[arg(value_name = "INDEX", required = true)]
        indices: Vec<usize>,
    },

    /// Include items in rekey passes
    Select {
        #[arg(value_name = "INDEX", required = true)]
        indices: Vec<usize>,
    },

    /// Exclude items from rekey passes
    Deselect {
        #[arg(value_name = "INDEX", required = true)]
        indices: Vec<usize>,
    },

    /// Change the master password and re-encrypt selected items
    Passwd,

    /// Report items that do not open under the current password
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}
