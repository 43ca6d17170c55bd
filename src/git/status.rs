//! Change listing
//!
//! Lists staged, unstaged and untracked paths and parses porcelain status.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::GitError;
use super::Git;

/// Where a changed file currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileStatus {
    /// Recorded in the index
    Staged,
    /// Modified in the working tree only
    Unstaged,
    /// Unknown to git
    Untracked,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Staged => "staged",
            Self::Unstaged => "unstaged",
            Self::Untracked => "untracked",
        })
    }
}

/// One line of `git status --porcelain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Index status column (`?` for untracked)
    pub index: char,
    /// Work tree status column
    pub worktree: char,
    /// Path (new path for renames)
    pub path: String,
}

impl StatusEntry {
    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }
}

/// Parse newline-separated path output, skipping blank lines
pub fn parse_name_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `git status --porcelain` (v1) output
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    output
        .lines()
        .filter_map(|line| {
            let mut chars = line.chars();
            let index = chars.next()?;
            let worktree = chars.next()?;
            let rest = line.get(3..)?;
            if rest.is_empty() {
                return None;
            }

            // Renames are reported as "old -> new"
            let path = rest.rsplit(" -> ").next().unwrap_or(rest);
            let path = path
                .strip_prefix('"')
                .and_then(|p| p.strip_suffix('"'))
                .unwrap_or(path);

            Some(StatusEntry {
                index,
                worktree,
                path: path.to_string(),
            })
        })
        .collect()
}

/// The three change lists the selector is built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLists {
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
    pub untracked: Vec<String>,
}

impl ChangeLists {
    /// Every changed path once, sorted
    pub fn union(&self) -> Vec<String> {
        self.staged
            .iter()
            .chain(&self.unstaged)
            .chain(&self.untracked)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Selected paths that have work tree changes to add to the index
    pub fn needing_stage(&self, selected: &[String]) -> Vec<String> {
        selected
            .iter()
            .filter(|path| self.unstaged.contains(path) || self.untracked.contains(path))
            .cloned()
            .collect()
    }
}

impl Git {
    /// Paths with changes recorded in the index
    pub fn staged_files(&self) -> Result<Vec<String>, GitError> {
        Ok(parse_name_list(&self.run(&["diff", "--cached", "--name-only"])?))
    }

    /// Paths modified in the working tree but not staged
    pub fn unstaged_files(&self) -> Result<Vec<String>, GitError> {
        Ok(parse_name_list(&self.run(&["diff", "--name-only"])?))
    }

    /// Paths unknown to git, honoring ignore rules
    pub fn untracked_files(&self) -> Result<Vec<String>, GitError> {
        Ok(parse_name_list(&self.run(&["ls-files", "--others", "--exclude-standard"])?))
    }

    pub fn change_lists(&self) -> Result<ChangeLists, GitError> {
        Ok(ChangeLists {
            staged: self.staged_files()?,
            unstaged: self.unstaged_files()?,
            untracked: self.untracked_files()?,
        })
    }

    /// Porcelain status of the whole work tree
    pub fn status(&self) -> Result<Vec<StatusEntry>, GitError> {
        Ok(parse_porcelain(&self.run(&["status", "--porcelain"])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::scratch_repo;
    use std::fs;

    #[test]
    fn test_parse_name_list() {
        let output = "src/main.rs\n\nREADME.md\r\n  \n";
        assert_eq!(parse_name_list(output), vec!["src/main.rs", "README.md"]);
        assert!(parse_name_list("").is_empty());
    }

    #[test]
    fn test_parse_porcelain() {
        let output = "M  src/lib.rs\n M README.md\n?? notes.txt\nR  old.rs -> new.rs\n?? \"with space.txt\"\n";
        let entries = parse_porcelain(output);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0], StatusEntry { index: 'M', worktree: ' ', path: "src/lib.rs".into() });
        assert_eq!(entries[1].worktree, 'M');
        assert!(entries[2].is_untracked());
        assert_eq!(entries[3].path, "new.rs");
        assert_eq!(entries[4].path, "with space.txt");
    }

    #[test]
    fn test_change_lists() {
        let lists = ChangeLists {
            staged: vec!["b.rs".into(), "both.rs".into()],
            unstaged: vec!["both.rs".into(), "a.rs".into()],
            untracked: vec!["c.rs".into()],
        };
        assert_eq!(lists.union(), vec!["a.rs", "b.rs", "both.rs", "c.rs"]);

        let selected: Vec<String> = vec!["b.rs".into(), "both.rs".into(), "c.rs".into()];
        assert_eq!(lists.needing_stage(&selected), vec!["both.rs", "c.rs"]);
    }

    #[test]
    fn test_lists_from_repository() {
        let Some((dir, git)) = scratch_repo() else {
            return;
        };

        fs::write(dir.path().join("tracked.txt"), "one\n").unwrap();
        git.run(&["add", "tracked.txt"]).unwrap();
        git.run(&["commit", "-q", "-m", "initial"]).unwrap();

        fs::write(dir.path().join("tracked.txt"), "one\ntwo\n").unwrap();
        fs::write(dir.path().join("staged.txt"), "staged\n").unwrap();
        fs::write(dir.path().join("new.txt"), "new\n").unwrap();
        git.run(&["add", "staged.txt"]).unwrap();

        assert_eq!(git.staged_files().unwrap(), vec!["staged.txt"]);
        assert_eq!(git.unstaged_files().unwrap(), vec!["tracked.txt"]);
        assert_eq!(git.untracked_files().unwrap(), vec!["new.txt"]);
        assert_eq!(git.status().unwrap().len(), 3);

        let lists = git.change_lists().unwrap();
        assert_eq!(lists.union(), vec!["new.txt", "staged.txt", "tracked.txt"]);
    }
}
