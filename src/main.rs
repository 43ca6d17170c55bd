//! commet - commit assistant for git
//!
//! Drafts commit messages with a language-model provider and offers an
//! interactive terminal picker for choosing what gets committed.
//!
//! # Usage
//!
//! ```bash
//! commet commit              # Commit staged (or all) changes
//! commet commit -i           # Pick files interactively
//! commet commit -y           # Commit the drafted message without asking
//! commet config show         # Print settings, API key masked
//! commet config set -p groq  # Change settings (no flags opens the editor)
//! ```

mod app;
mod commit;
mod config;
mod config_editor;
mod error;
mod git;
mod loader;
mod logging;
mod prompt;
mod provider;
mod selector;
mod syntax;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::commit::CommitOptions;
use crate::config::{ConfigStore, Provider};
use crate::git::Git;

/// Commit assistant with AI-drafted messages
#[derive(Parser, Debug)]
#[command(name = "commet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (defaults to ~/.commet.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message and commit
    Commit {
        /// Pick files with the interactive selector
        #[arg(short, long)]
        interactive: bool,

        /// Commit without asking for confirmation
        #[arg(short = 'y', long)]
        yes: bool,

        /// Draft the message with AI even when disabled in the config
        #[arg(short, long)]
        ai: bool,
    },

    /// Manage configuration settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set configuration values; without flags opens the editor
    Set {
        /// AI provider (openai, claude, google, groq)
        #[arg(short, long)]
        provider: Option<Provider>,

        /// API key for the AI provider
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Model to use instead of the provider default
        #[arg(short, long)]
        model: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = logging::init()? {
        debug!(log = %path.display(), "logging enabled");
    }

    let store = match args.config {
        Some(path) => ConfigStore::at(path),
        None => ConfigStore::default_location()?,
    };

    match args.command {
        Command::Commit {
            interactive,
            yes,
            ai,
        } => {
            let config = store.load()?;
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let git = Git::discover(&cwd)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;

            let options = CommitOptions {
                interactive,
                yes,
                ai,
            };
            commit::run(git, &config, options, &runtime)
        }
        Command::Config(ConfigCommand::Show) => {
            let config = store.load()?;
            print!("{}", config.summary());
            println!("\nConfig file: {}", store.path().display());
            Ok(())
        }
        Command::Config(ConfigCommand::Set {
            provider,
            api_key,
            model,
        }) => {
            let mut config = store.load()?;

            if provider.is_none() && api_key.is_none() && model.is_none() {
                if config_editor::run_config_editor(&store, config)? {
                    println!("{}", "Configuration saved successfully!".green());
                }
                return Ok(());
            }

            config.apply_settings(provider, api_key, model);
            store.save(&config)?;
            println!("{}", "Configuration updated successfully!".green());
            Ok(())
        }
    }
}
