//! Syntax highlighting for diff previews
//!
//! Highlights the code part of each diff line with syntect, picking the
//! grammar from the file's path. Diff markers and metadata lines are left to
//! the diff pane's own styles.

use std::path::Path;

use ratatui::style::{Color, Modifier, Style as RatatuiStyle};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::debug;

use crate::git::{LineType, classify_line};

const THEME: &str = "base16-ocean.dark";

/// A styled token for display
#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub style: RatatuiStyle,
}

/// A line of highlighted tokens
pub type HighlightedLine = Vec<Token>;

pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(THEME).unwrap_or_default();
        Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme,
        }
    }

    /// Highlight the bodies of a diff's code lines.
    ///
    /// The result is parallel to `lines`. Entries are `None` for lines that
    /// carry no code (file headers, hunk headers, anything unrecognized).
    /// Bodies exclude the leading `+`, `-` or space.
    pub fn highlight_diff(&self, path: &str, lines: &[String]) -> Vec<Option<HighlightedLine>> {
        let syntax = self.detect_syntax(path);
        debug!(path, syntax = %syntax.name, "highlighting diff");

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        lines
            .iter()
            .map(|line| {
                let body = code_body(line)?;
                let tokens = match highlighter.highlight_line(body, &self.syntax_set) {
                    Ok(ranges) => ranges
                        .into_iter()
                        .map(|(style, text)| Token {
                            text: text.to_string(),
                            style: syntect_style_to_ratatui(style),
                        })
                        .collect(),
                    Err(_) => vec![Token {
                        text: body.to_string(),
                        style: RatatuiStyle::default(),
                    }],
                };
                Some(tokens)
            })
            .collect()
    }

    fn detect_syntax(&self, path: &str) -> &SyntaxReference {
        let path = Path::new(path);

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if let Some(syntax) = self.syntax_set.find_syntax_by_extension(ext) {
                return syntax;
            }
        }

        // Extensionless names such as Makefile or Dockerfile
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if let Some(syntax) = self.syntax_set.find_syntax_by_extension(name) {
                return syntax;
            }
        }

        self.syntax_set.find_syntax_plain_text()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// The code carried by a diff line, without its marker
fn code_body(line: &str) -> Option<&str> {
    match classify_line(line) {
        LineType::Added | LineType::Removed => Some(&line[1..]),
        LineType::Context => line.strip_prefix(' '),
        LineType::HunkHeader => None,
    }
}

fn syntect_style_to_ratatui(style: Style) -> RatatuiStyle {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
    let mut ratatui_style = RatatuiStyle::default().fg(fg);

    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }

    ratatui_style
}
