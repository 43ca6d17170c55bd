//! Repository discovery and command execution

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// Handle to a repository work tree. Every operation shells out to `git`
/// with the work tree root as its current directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    /// Find the repository containing `path`
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::NotARepository)?;
        let workdir = repo.workdir().ok_or(GitError::Bare)?.to_path_buf();
        debug!(workdir = %workdir.display(), "discovered repository");
        Ok(Self { workdir })
    }

    /// Root of the work tree; every reported path is relative to it
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run `git <args>` and return its stdout
    pub(crate) fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        debug!(%command, "running git");

        let output = Command::new("git")
            .args(["-c", "core.quotepath=false"])
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run `git <args> -- <paths...>`
    pub(crate) fn run_with_paths(&self, args: &[&str], paths: &[String]) -> Result<String, GitError> {
        let mut full: Vec<&str> = args.to_vec();
        full.push("--");
        full.extend(paths.iter().map(String::as_str));
        self.run(&full)
    }

    /// Whether HEAD points at a commit (false on a fresh repository)
    pub(crate) fn has_head(&self) -> bool {
        self.run(&["rev-parse", "--verify", "--quiet", "HEAD"]).is_ok()
    }
}
