//! Diff preview rendering
//!
//! Draws the diff of the file under the cursor, colored by line type with
//! syntax-highlighted code, and a `[first-last of total]` scroll indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::git::{LineType, classify_line};
use crate::syntax::{HighlightedLine, Token};
use super::Styles;

const TAB_WIDTH: usize = 4;

pub struct DiffPane<'a> {
    pub path: Option<&'a str>,
    pub lines: &'a [String],
    /// Highlighted code bodies, parallel to `lines` (may be shorter)
    pub highlighted: &'a [Option<HighlightedLine>],
    pub scroll: usize,
    pub loading: bool,
    pub styles: &'a Styles,
}

impl Widget for DiffPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match (self.path, self.loading) {
            (Some(path), true) => format!(" {} (loading) ", path),
            (Some(path), false) => format!(" {} ", path),
            (None, _) => " Diff ".to_string(),
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border)
            .title(Span::styled(title, self.styles.title));

        let inner = block.inner(area);
        if let Some(indicator) = scroll_indicator(self.scroll, inner.height as usize, self.lines.len()) {
            block = block.title_bottom(
                Line::styled(format!(" {} ", indicator), self.styles.scroll_indicator).right_aligned(),
            );
        }
        block.render(area, buf);

        if self.lines.is_empty() {
            let text = if self.loading { "Loading diff..." } else { "No diff" };
            buf.set_line(inner.x, inner.y, &Line::styled(text, self.styles.hint), inner.width);
            return;
        }

        for (row, (index, line)) in self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let highlighted = self.highlighted.get(index).and_then(Option::as_ref);
            render_line(buf, inner.x, y, inner.width, line, highlighted, self.styles);
        }
    }
}

/// `[first-last of total]` for the visible window, 1-based
pub fn scroll_indicator(scroll: usize, height: usize, total: usize) -> Option<String> {
    if total == 0 || height == 0 {
        return None;
    }
    let first = scroll.min(total - 1) + 1;
    let last = (scroll + height).min(total);
    Some(format!("[{}-{} of {}]", first, last, total))
}

fn line_style(line: &str, styles: &Styles) -> Style {
    match classify_line(line) {
        LineType::Added => styles.line_added,
        LineType::Removed => styles.line_removed,
        LineType::HunkHeader => styles.hunk_header,
        LineType::Context if is_meta(line) => styles.line_meta,
        LineType::Context => styles.line_context,
    }
}

fn is_meta(line: &str) -> bool {
    ["diff ", "index ", "--- ", "+++ ", "new file", "deleted file", "similarity", "rename "]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

fn render_line(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    width: u16,
    line: &str,
    highlighted: Option<&HighlightedLine>,
    styles: &Styles,
) {
    let style = line_style(line, styles);

    // Added and removed rows are tinted across the full width
    if matches!(classify_line(line), LineType::Added | LineType::Removed) {
        for i in x..x + width {
            buf[(i, y)].set_char(' ').set_style(style);
        }
    }

    let spans = match highlighted {
        Some(tokens) => {
            let marker: String = line.chars().take(1).collect();
            let mut spans = vec![Span::styled(marker, style)];
            spans.extend(
                expand_tabs_tokens(tokens, TAB_WIDTH)
                    .into_iter()
                    .map(|token| Span::styled(token.text, style.patch(token.style))),
            );
            spans
        }
        None => vec![Span::styled(expand_tabs(line, TAB_WIDTH), style)],
    };

    buf.set_line(x, y, &Line::from(spans), width);
}

/// Tab stops are counted from the start of the code, after the marker
fn expand_tabs_tokens(tokens: &[Token], tab_width: usize) -> Vec<Token> {
    let mut expanded = Vec::new();
    let mut col = 0usize;

    for token in tokens {
        let mut text = String::new();
        for ch in token.text.chars() {
            if ch == '\t' {
                let spaces = tab_width - col % tab_width;
                text.extend(std::iter::repeat_n(' ', spaces));
                col += spaces;
            } else {
                text.push(ch);
                col += ch.width().unwrap_or(0);
            }
        }

        if !text.is_empty() {
            expanded.push(Token {
                text,
                style: token.style,
            });
        }
    }

    expanded
}

fn expand_tabs(content: &str, tab_width: usize) -> String {
    let token = Token {
        text: content.to_string(),
        style: Style::default(),
    };
    expand_tabs_tokens(&[token], tab_width)
        .into_iter()
        .map(|t| t.text)
        .collect()
}

/// Render the diff preview
#[allow(clippy::too_many_arguments)]
pub fn render_diff_pane(
    buf: &mut Buffer,
    area: Rect,
    path: Option<&str>,
    lines: &[String],
    highlighted: &[Option<HighlightedLine>],
    scroll: usize,
    loading: bool,
    styles: &Styles,
) {
    let pane = DiffPane {
        path,
        lines,
        highlighted,
        scroll,
        loading,
        styles,
    };
    pane.render(area, buf);
}
