//! File list rendering
//!
//! One row per changed file: cursor marker, checkbox, status glyph and path.
//! The last row holds the glyph legend.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::git::FileStatus;
use crate::selector::FileEntry;
use super::Styles;

/// Width of the file list panel, borders included
pub const FILE_LIST_WIDTH: u16 = 40;

const LEGEND: &str = "● staged ◯ unstaged ✦ untracked";

/// Status glyph shown before each path
pub fn status_glyph(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Staged => "●",
        FileStatus::Unstaged => "◯",
        FileStatus::Untracked => "✦",
    }
}

pub struct FileList<'a> {
    pub entries: &'a [FileEntry],
    /// Inclusion flag per entry
    pub included: &'a [bool],
    pub cursor: usize,
    pub styles: &'a Styles,
}

impl FileList<'_> {
    fn status_style(&self, status: FileStatus) -> Style {
        match status {
            FileStatus::Staged => self.styles.status_staged,
            FileStatus::Unstaged => self.styles.status_unstaged,
            FileStatus::Untracked => self.styles.status_untracked,
        }
    }
}

impl Widget for FileList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border_focus)
            .title(Span::styled(" Files ", self.styles.title));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        // Keep one row for the legend when there is room
        let list_height = if inner.height > 1 {
            inner.height as usize - 1
        } else {
            inner.height as usize
        };
        let scroll = list_scroll(self.cursor, list_height);

        for (row, (index, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(scroll)
            .take(list_height)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let is_cursor = index == self.cursor;
            let base = if is_cursor {
                self.styles.list_cursor
            } else {
                self.styles.list_normal
            };

            let included = self.included.get(index).copied().unwrap_or(false);
            let (checkbox, checkbox_style) = if included {
                ("[x] ", base.patch(self.styles.checkbox_on))
            } else {
                ("[ ] ", base)
            };

            let marker = if is_cursor { "> " } else { "  " };
            let prefix_width = marker.width() + checkbox.width() + 2;
            let path = smart_truncate(
                &entry.path,
                (inner.width as usize).saturating_sub(prefix_width),
            );

            let spans = vec![
                Span::styled(marker, base),
                Span::styled(checkbox, checkbox_style),
                Span::styled(
                    format!("{} ", status_glyph(entry.status)),
                    base.patch(self.status_style(entry.status)),
                ),
                Span::styled(path, base),
            ];

            if is_cursor {
                for x in inner.x..inner.x + inner.width {
                    buf[(x, y)].set_style(base);
                }
            }
            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
        }

        if inner.height > 1 {
            let y = inner.y + inner.height - 1;
            buf.set_line(
                inner.x,
                y,
                &Line::styled(format!(" {}", LEGEND), self.styles.legend),
                inner.width,
            );
        }
    }
}

/// First visible row so that the cursor stays on screen
fn list_scroll(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        (cursor + 1).saturating_sub(height)
    }
}

/// Shorten a path to `max_width` columns, keeping its start and end
fn smart_truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width < 5 {
        return take_width(s.chars(), max_width);
    }

    let available = max_width - 1;
    let prefix_len = (available * 2) / 3;
    let suffix_len = available - prefix_len;

    let prefix = take_width(s.chars(), prefix_len);
    let suffix: String = take_width(s.chars().rev(), suffix_len).chars().rev().collect();

    format!("{}…{}", prefix, suffix)
}

fn take_width(chars: impl Iterator<Item = char>, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for c in chars {
        let cw = c.width().unwrap_or(0);
        if width + cw > max_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}

/// Render the file list
pub fn render_file_list(
    buf: &mut Buffer,
    area: Rect,
    entries: &[FileEntry],
    included: &[bool],
    cursor: usize,
    styles: &Styles,
) {
    let list = FileList {
        entries,
        included,
        cursor,
        styles,
    };
    list.render(area, buf);
}
