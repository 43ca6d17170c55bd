//! Header rendering
//!
//! Displays the branch, how many files are selected, the line stats of the
//! previewed diff and the previewed file.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::Styles;

/// Header widget for the file selector
pub struct Header<'a> {
    /// Checked-out branch; empty when HEAD is detached
    pub branch: &'a str,
    pub selected: usize,
    pub total: usize,
    /// Lines added and removed in the previewed diff
    pub added: usize,
    pub removed: usize,
    /// File whose diff is shown
    pub current_file: Option<&'a str>,
    pub styles: &'a Styles,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(self.styles.header);
        }

        let branch = if self.branch.is_empty() {
            "(detached)"
        } else {
            self.branch
        };

        let mut spans = vec![
            Span::styled(" commet ", self.styles.footer_key),
            Span::styled("│ ", self.styles.header_dim),
            Span::styled(format!("{} ", branch), self.styles.header),
            Span::styled("│ ", self.styles.header_dim),
            Span::styled(
                format!("[{}/{} selected] ", self.selected, self.total),
                self.styles.header,
            ),
        ];

        if self.added > 0 || self.removed > 0 {
            spans.push(Span::styled(
                format!("+{}", self.added),
                self.styles.header.patch(self.styles.stats_added),
            ));
            spans.push(Span::styled(" ", self.styles.header));
            spans.push(Span::styled(
                format!("-{}", self.removed),
                self.styles.header.patch(self.styles.stats_removed),
            ));
        }

        // Right-aligned when it fits
        if let Some(file) = self.current_file {
            let file_info = format!(" {} ", file);
            let file_width = file_info.width() as u16;
            let left_width: u16 = spans.iter().map(|s| s.content.width() as u16).sum();

            if left_width + file_width < area.width {
                let padding = area.width - left_width - file_width;
                spans.push(Span::styled(" ".repeat(padding as usize), self.styles.header));
                spans.push(Span::styled(file_info, self.styles.header_dim));
            }
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// Render the header bar
#[allow(clippy::too_many_arguments)]
pub fn render_header(
    buf: &mut Buffer,
    area: Rect,
    branch: &str,
    selected: usize,
    total: usize,
    added: usize,
    removed: usize,
    current_file: Option<&str>,
    styles: &Styles,
) {
    let header = Header {
        branch,
        selected,
        total,
        added,
        removed,
        current_file,
        styles,
    };
    header.render(area, buf);
}
