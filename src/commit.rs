//! The `commit` command
//!
//! Collects the change-set (through the file selector or straight from the
//! index), drafts a message with the configured provider or asks for one,
//! then commits and optionally pushes. Repository state only changes after
//! the user has made their selection.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::app::run_selector;
use crate::config::Config;
use crate::git::{ChangeLists, Git, LineType, classify_line};
use crate::prompt::commit_message_prompt;
use crate::provider::ProviderClient;
use crate::selector::{Selection, SelectorOutcome};

const NO_CHANGES: &str =
    "No changes detected. Make sure you have staged changes or unstaged changes to commit.";

/// Flags of the `commit` subcommand
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
    /// Pick files with the interactive selector
    pub interactive: bool,
    /// Commit without asking
    pub yes: bool,
    /// Draft the message with the provider even when disabled in config
    pub ai: bool,
}

pub fn run(git: Git, config: &Config, options: CommitOptions, runtime: &Runtime) -> Result<()> {
    let use_ai = options.ai || config.git.use_ai;
    let client = if use_ai {
        Some(ProviderClient::new(&config.ai)?)
    } else {
        None
    };

    let status = git.status()?;
    if status.is_empty() {
        println!("{}", "No changes detected".yellow());
        return Ok(());
    }
    debug!(
        changed = status.len(),
        untracked = status.iter().filter(|e| e.is_untracked()).count(),
        "working tree status"
    );

    let diff = if options.interactive || config.git.interactive {
        let changes = git.change_lists()?;
        let git = Arc::new(git.clone());
        match run_selector(Arc::clone(&git), runtime.handle().clone(), &changes)? {
            SelectorOutcome::Cancelled => return Ok(()),
            SelectorOutcome::Confirmed(selection) => apply_selection(&git, &changes, &selection)?,
        }
    } else {
        let spinner = spinner("Analyzing git changes...")?;
        let diff = git.working_diff(config.git.auto_stage);
        spinner.finish_and_clear();
        diff.context("Error getting git diff")?
    };

    if diff.trim().is_empty() {
        println!("{}", NO_CHANGES.yellow());
        return Ok(());
    }
    println!("{}", "Found changes to commit".green());

    if config.git.show_diff {
        print_diff(&diff);
    }

    let message = match &client {
        Some(client) => generate_message(client, &diff, runtime)?,
        None => match manual_message()? {
            Some(message) => message,
            None => {
                println!("{}", "Commit message cannot be empty".red());
                return Ok(());
            }
        },
    };

    if use_ai {
        println!("\n{}\n", message.bold());
    }
    copy_to_clipboard(&message);

    let commit_now = commits_without_asking(options.yes, config.git.direct_commit, use_ai)
        || ask("Create a commit with this message?")?;
    if !commit_now {
        println!("{}", "Commit message copied to clipboard. No commit created.".yellow());
        return Ok(());
    }

    git.commit(&message).context("Error creating commit")?;
    println!("{}", "Commit created successfully!".green());

    if config.git.confirm_push && ask("Do you want to push the changes?")? {
        git.push().context("Error pushing changes")?;
        println!("{}", "Changes pushed successfully!".green());
    }

    Ok(())
}

/// Bring the index in line with the selection and return the staged diff
/// of the selected files
fn apply_selection(git: &Git, changes: &ChangeLists, selection: &Selection) -> Result<String> {
    if !selection.to_unstage.is_empty() {
        println!(
            "{} {}",
            "Unstaging deselected files:".cyan(),
            selection.to_unstage.join(", ")
        );
        git.unstage(&selection.to_unstage)
            .context("Failed to unstage files")?;
    }

    let to_stage = changes.needing_stage(&selection.selected);
    if !to_stage.is_empty() {
        println!("{} {}", "Staging selected files:".cyan(), to_stage.join(", "));
        git.stage(&to_stage).context("Failed to stage files")?;
    }

    Ok(git.diff_for_paths(&selection.selected, true)?)
}

/// Manual messages and direct-commit mode skip the confirmation
fn commits_without_asking(yes: bool, direct_commit: bool, use_ai: bool) -> bool {
    yes || direct_commit || !use_ai
}

fn generate_message(client: &ProviderClient, diff: &str, runtime: &Runtime) -> Result<String> {
    let spinner = spinner(&format!("Generating commit message using {}...", client.provider()))?;
    let prompt = commit_message_prompt(diff);
    let result = runtime.block_on(client.generate(&prompt));
    spinner.finish_and_clear();

    debug!(model = client.model(), ok = result.is_ok(), "generation finished");
    result.context("Error generating commit message")
}

fn manual_message() -> Result<Option<String>> {
    let message: String = Input::new()
        .with_prompt("Enter commit message")
        .allow_empty(true)
        .interact_text()?;
    let message = message.trim();
    Ok((!message.is_empty()).then(|| message.to_string()))
}

fn ask(question: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()?)
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn copy_to_clipboard(message: &str) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(message));
    if let Err(e) = result {
        warn!(error = %e, "could not copy commit message to clipboard");
    }
}

fn colorize_diff_line(line: &str) -> String {
    match classify_line(line) {
        LineType::Added => line.green().to_string(),
        LineType::Removed => line.red().to_string(),
        LineType::HunkHeader => line.cyan().to_string(),
        LineType::Context if line.starts_with("diff ") => line.bold().to_string(),
        LineType::Context => line.to_string(),
    }
}

fn print_diff(diff: &str) {
    println!();
    for line in diff.lines() {
        println!("{}", colorize_diff_line(line));
    }
    println!();
}
