//! Git diff retrieval
//!
//! Fetches unified diffs for single paths or path sets, synthesizes
//! addition diffs for untracked files, and classifies diff lines for
//! display.

use std::fs;

use tracing::debug;

use crate::error::GitError;
use super::{FileStatus, Git};

/// Type of a diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Unchanged line, file header, or anything unrecognized
    Context,
    /// Line was added
    Added,
    /// Line was removed
    Removed,
    /// Hunk header (@@...@@)
    HunkHeader,
}

/// Which side of the index a tracked file's diff is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Index against HEAD (`--cached`)
    Staged,
    /// Working tree against index
    Unstaged,
}

/// Classify a raw unified-diff line by its prefix
pub fn classify_line(line: &str) -> LineType {
    if line.starts_with('+') && !line.starts_with("+++") {
        LineType::Added
    } else if line.starts_with('-') && !line.starts_with("---") {
        LineType::Removed
    } else if line.starts_with("@@") {
        LineType::HunkHeader
    } else {
        LineType::Context
    }
}

/// Count added and removed lines in diff text
pub fn diff_stats(diff: &str) -> (usize, usize) {
    diff.lines().fold((0, 0), |(added, removed), line| match classify_line(line) {
        LineType::Added => (added + 1, removed),
        LineType::Removed => (added, removed + 1),
        _ => (added, removed),
    })
}

/// Render a whole file as a single hunk of additions against an empty file
pub fn synthesize_addition_diff(path: &str, content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();

    let mut diff = format!("--- /dev/null\n+++ b/{}\n@@ -0,0 +1,{} @@\n", path, lines.len());
    for line in lines {
        diff.push('+');
        diff.push_str(line);
        diff.push('\n');
    }
    diff
}

impl Git {
    /// Diff of one tracked path
    pub fn diff_for_path(&self, path: &str, mode: DiffMode) -> Result<String, GitError> {
        let paths = [path.to_string()];
        match mode {
            DiffMode::Staged => self.run_with_paths(&["diff", "--cached"], &paths),
            DiffMode::Unstaged => self.run_with_paths(&["diff"], &paths),
        }
    }

    /// Addition diff for an untracked path, read from the work tree
    pub fn untracked_diff(&self, path: &str) -> Result<String, GitError> {
        let full_path = self.workdir().join(path);
        let bytes = fs::read(&full_path).map_err(|source| GitError::ReadFile {
            path: full_path,
            source,
        })?;
        Ok(synthesize_addition_diff(path, &String::from_utf8_lossy(&bytes)))
    }

    /// Preview text for a file in the selector. Failures are rendered as
    /// text so the interaction can continue.
    pub fn preview_diff(&self, path: &str, status: FileStatus) -> String {
        let result = match status {
            FileStatus::Staged => self.diff_for_path(path, DiffMode::Staged),
            FileStatus::Unstaged => self.diff_for_path(path, DiffMode::Unstaged),
            FileStatus::Untracked => self.untracked_diff(path),
        };

        match result {
            Ok(diff) => diff,
            Err(e) => {
                debug!(path, error = %e, "diff preview failed");
                format!("Error loading diff: {}", e)
            }
        }
    }

    /// Combined diff for a set of paths. An empty set means the whole tree.
    pub fn diff_for_paths(&self, paths: &[String], staged: bool) -> Result<String, GitError> {
        let args: &[&str] = if staged { &["diff", "--cached"] } else { &["diff"] };
        if paths.is_empty() {
            self.run(args)
        } else {
            self.run_with_paths(args, paths)
        }
    }

    /// Diff used by the non-interactive flow: staged changes first; when
    /// nothing is staged, either stage everything (auto-stage) or fall back
    /// to the working tree diff.
    pub fn working_diff(&self, auto_stage: bool) -> Result<String, GitError> {
        let staged = self.run(&["diff", "--cached"])?;
        if !staged.is_empty() {
            return Ok(staged);
        }

        if auto_stage {
            self.stage_all()?;
            return self.run(&["diff", "--cached"]);
        }

        self.run(&["diff"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::scratch_repo;

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("+foo"), LineType::Added);
        assert_eq!(classify_line("+++ b/x"), LineType::Context);
        assert_eq!(classify_line("-bar"), LineType::Removed);
        assert_eq!(classify_line("--- a/x"), LineType::Context);
        assert_eq!(classify_line("@@ -1,2 +1,3 @@"), LineType::HunkHeader);
        assert_eq!(classify_line(" unchanged"), LineType::Context);
        assert_eq!(classify_line("diff --git a/x b/x"), LineType::Context);
        assert_eq!(classify_line(""), LineType::Context);
    }

    #[test]
    fn test_synthesize_addition_diff() {
        let diff = synthesize_addition_diff("notes.txt", "alpha\nbeta\ngamma\n");
        assert_eq!(
            diff,
            "--- /dev/null\n+++ b/notes.txt\n@@ -0,0 +1,3 @@\n+alpha\n+beta\n+gamma\n"
        );

        // No trailing newline yields the same three lines
        assert_eq!(diff, synthesize_addition_diff("notes.txt", "alpha\nbeta\ngamma"));
    }

    #[test]
    fn test_synthesize_empty_file() {
        assert_eq!(
            synthesize_addition_diff("empty", ""),
            "--- /dev/null\n+++ b/empty\n@@ -0,0 +1,0 @@\n"
        );
    }

    #[test]
    fn test_diff_stats() {
        let diff = "--- a/x\n+++ b/x\n@@ -1,2 +1,2 @@\n-old\n+new\n+more\n context\n";
        assert_eq!(diff_stats(diff), (2, 1));
    }

    #[test]
    fn test_preview_by_status() {
        let Some((dir, git)) = scratch_repo() else {
            return;
        };

        fs::write(dir.path().join("a.txt"), "one\n").unwrap();
        git.stage(&["a.txt".to_string()]).unwrap();
        fs::write(dir.path().join("b.txt"), "x\ny\n").unwrap();

        let staged = git.preview_diff("a.txt", FileStatus::Staged);
        assert!(staged.contains("+one"));

        let untracked = git.preview_diff("b.txt", FileStatus::Untracked);
        assert_eq!(untracked, "--- /dev/null\n+++ b/b.txt\n@@ -0,0 +1,2 @@\n+x\n+y\n");

        let missing = git.preview_diff("gone.txt", FileStatus::Untracked);
        assert!(missing.starts_with("Error loading diff: "));
    }

    #[test]
    fn test_working_diff_auto_stage() {
        let Some((dir, git)) = scratch_repo() else {
            return;
        };

        fs::write(dir.path().join("a.txt"), "one\n").unwrap();
        assert!(git.working_diff(false).unwrap().is_empty());
        assert!(git.staged_files().unwrap().is_empty());

        let diff = git.working_diff(true).unwrap();
        assert!(diff.contains("+one"));
        assert_eq!(git.staged_files().unwrap(), vec!["a.txt"]);
    }
}
