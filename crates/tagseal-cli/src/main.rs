//! Tagseal CLI - client-side protection for tag lists stored on untrusted servers
//!
//! The CLI plays the hosting form: a TOML config supplies the default password
//! and salt, a JSON file holds the submitted item values, and every edit goes
//! through a session of the core library before the file is rewritten.

mod app;
mod cli;
mod commands;
mod config;
mod form;
mod helpers;
mod output;
mod store;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{check, init, items, misc, passwd, show};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TAGSEAL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Init(args) => init::handle_init(&cli, args),
        Commands::Show { json } => show::handle_show(&cli, *json).await,
        Commands::Add { tags } => items::handle_add(&cli, tags).await,
        Commands::Remove { indices } => items::handle_remove(&cli, indices).await,
        Commands::Select { indices } => items::handle_selection(&cli, indices, true).await,
        Commands::Deselect { indices } => items::handle_selection(&cli, indices, false).await,
        Commands::Passwd => passwd::handle_passwd(&cli).await,
        Commands::Check => check::handle_check(&cli).await,
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}
