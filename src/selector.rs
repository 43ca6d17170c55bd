//! File selector model
//!
//! The state behind the interactive picker: which files changed, which are
//! included in the commit, where the cursor is, and the diff preview for the
//! file under the cursor. Input handling and rendering live in `app`; this
//! module only applies transitions so it can be driven directly in tests.

use std::collections::HashSet;

use crate::error::SelectorError;
use crate::git::FileStatus;

/// Rows of the screen not available to the diff preview (header, footer and
/// the preview's top and bottom borders)
pub const CHROME_ROWS: u16 = 4;

/// Direction for cursor moves and diff scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A changed file with its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub status: FileStatus,
}

/// Request to load the diff preview for the entry at `index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    pub index: usize,
    pub path: String,
    pub status: FileStatus,
}

/// Completed diff load, tagged with the cursor position that requested it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReady {
    pub index: usize,
    pub text: String,
}

/// Files chosen when the selector is confirmed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Included files, in list order
    pub selected: Vec<String>,
    /// Initially staged files the user excluded
    pub to_unstage: Vec<String>,
}

/// How the interaction ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
    Confirmed(Selection),
    Cancelled,
}

/// Diff preview for the entry under the cursor
#[derive(Debug, Clone, Default)]
pub struct DiffPreview {
    /// Entry the preview belongs to
    pub index: Option<usize>,
    pub lines: Vec<String>,
    pub scroll: usize,
    pub loading: bool,
}

/// Selector state
#[derive(Debug, Clone)]
pub struct Selector {
    entries: Vec<FileEntry>,
    included: Vec<bool>,
    cursor: usize,
    preview: DiffPreview,
    page_height: usize,
    outcome: Option<SelectorOutcome>,
}

impl Selector {
    /// Build the selector from the union file list and the three status
    /// lists. Status priority is staged, then unstaged, then untracked;
    /// staged entries start included.
    pub fn new(
        files: &[String],
        staged: &[String],
        unstaged: &[String],
        untracked: &[String],
    ) -> Result<Self, SelectorError> {
        let staged: HashSet<&str> = staged.iter().map(String::as_str).collect();
        let unstaged: HashSet<&str> = unstaged.iter().map(String::as_str).collect();
        let untracked: HashSet<&str> = untracked.iter().map(String::as_str).collect();

        let mut seen = HashSet::new();
        let entries: Vec<FileEntry> = files
            .iter()
            .filter(|path| seen.insert(path.as_str()))
            .map(|path| {
                let status = if staged.contains(path.as_str()) {
                    FileStatus::Staged
                } else if untracked.contains(path.as_str()) && !unstaged.contains(path.as_str()) {
                    FileStatus::Untracked
                } else {
                    FileStatus::Unstaged
                };
                FileEntry {
                    path: path.clone(),
                    status,
                }
            })
            .collect();

        if entries.is_empty() {
            return Err(SelectorError::NoChanges);
        }

        let included = entries
            .iter()
            .map(|e| e.status == FileStatus::Staged)
            .collect();

        Ok(Self {
            entries,
            included,
            cursor: 0,
            preview: DiffPreview::default(),
            page_height: 1,
            outcome: None,
        })
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_included(&self, index: usize) -> bool {
        self.included.get(index).copied().unwrap_or(false)
    }

    pub fn included_count(&self) -> usize {
        self.included.iter().filter(|i| **i).count()
    }

    pub fn preview(&self) -> &DiffPreview {
        &self.preview
    }

    #[cfg(test)]
    pub fn page_height(&self) -> usize {
        self.page_height
    }

    /// Take the final outcome, leaving the selector unfinished
    pub fn take_outcome(&mut self) -> Option<SelectorOutcome> {
        self.outcome.take()
    }

    /// Request for the entry under the cursor, marking the preview as loading
    pub fn request_current_diff(&mut self) -> DiffRequest {
        self.preview.loading = true;
        let entry = &self.entries[self.cursor];
        DiffRequest {
            index: self.cursor,
            path: entry.path.clone(),
            status: entry.status,
        }
    }

    /// Move the cursor one entry. Returns a load request when the cursor
    /// actually moved.
    pub fn move_cursor(&mut self, direction: Direction) -> Option<DiffRequest> {
        let next = match direction {
            Direction::Up => self.cursor.checked_sub(1)?,
            Direction::Down if self.cursor + 1 < self.entries.len() => self.cursor + 1,
            Direction::Down => return None,
        };

        self.cursor = next;
        Some(self.request_current_diff())
    }

    /// Flip inclusion of the entry under the cursor
    pub fn toggle_selection(&mut self) {
        if let Some(flag) = self.included.get_mut(self.cursor) {
            *flag = !*flag;
        }
    }

    /// Apply a completed load. Results for an entry other than the one under
    /// the cursor are stale and dropped. Returns whether it was applied.
    pub fn apply_diff(&mut self, ready: DiffReady) -> bool {
        if ready.index != self.cursor {
            return false;
        }

        self.preview = DiffPreview {
            index: Some(ready.index),
            lines: ready.text.lines().map(str::to_string).collect(),
            scroll: 0,
            loading: false,
        };
        true
    }

    /// Record the terminal height; the preview page is what remains after
    /// the fixed chrome.
    pub fn set_display_height(&mut self, height: u16) {
        self.page_height = usize::from(height.saturating_sub(CHROME_ROWS)).max(1);
        self.preview.scroll = self.preview.scroll.min(self.max_scroll());
    }

    /// Highest scroll offset that still fills a page
    pub fn max_scroll(&self) -> usize {
        self.preview.lines.len().saturating_sub(self.page_height)
    }

    /// Scroll the preview by `amount` lines, clamped to the valid range
    pub fn scroll_diff(&mut self, direction: Direction, amount: usize) {
        let scroll = match direction {
            Direction::Up => self.preview.scroll.saturating_sub(amount),
            Direction::Down => self.preview.scroll.saturating_add(amount),
        };
        self.preview.scroll = scroll.min(self.max_scroll());
    }

    /// Scroll the preview by one page
    pub fn page_diff(&mut self, direction: Direction) {
        self.scroll_diff(direction, self.page_height);
    }

    /// End the interaction with the current selection. When nothing is
    /// included the entry under the cursor is included first.
    pub fn confirm(&mut self) -> &SelectorOutcome {
        if !self.included.iter().any(|i| *i) {
            self.included[self.cursor] = true;
        }
        self.outcome
            .insert(SelectorOutcome::Confirmed(self.selection()))
    }

    /// End the interaction without a selection
    pub fn cancel(&mut self) {
        self.outcome = Some(SelectorOutcome::Cancelled);
    }

    /// Current selection and the staged files that would be unstaged
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::default();
        for (entry, included) in self.entries.iter().zip(&self.included) {
            if *included {
                selection.selected.push(entry.path.clone());
            } else if entry.status == FileStatus::Staged {
                selection.to_unstage.push(entry.path.clone());
            }
        }
        selection
    }
}
