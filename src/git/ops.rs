//! Repository mutations: staging, commits, pushes

use tracing::debug;

use crate::error::GitError;
use super::Git;

impl Git {
    /// Stage the given paths
    pub fn stage(&self, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        debug!(?paths, "staging");
        self.run_with_paths(&["add"], paths).map(drop)
    }

    /// Stage every change in the work tree
    pub fn stage_all(&self) -> Result<(), GitError> {
        self.run(&["add", "."]).map(drop)
    }

    /// Remove the given paths from the index, keeping work tree contents
    pub fn unstage(&self, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        debug!(?paths, "unstaging");

        // `reset HEAD` needs a commit to reset to
        if self.has_head() {
            self.run_with_paths(&["reset", "-q", "HEAD"], paths).map(drop)
        } else {
            self.run_with_paths(&["rm", "--cached", "-q"], paths).map(drop)
        }
    }

    /// Create a commit from the index
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message]).map(drop)
    }

    pub fn push(&self) -> Result<(), GitError> {
        self.run(&["push"]).map(drop)
    }

    /// Name of the checked-out branch; empty when HEAD is detached
    pub fn current_branch(&self) -> Result<String, GitError> {
        Ok(self.run(&["branch", "--show-current"])?.trim().to_string())
    }
}
