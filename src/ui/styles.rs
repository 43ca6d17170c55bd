//! UI styles
//!
//! One palette shared by the file selector and the configuration editor.
//! Diff colors follow a delta-like scheme.

use ratatui::style::{Color, Modifier, Style};

pub mod colors {
    use ratatui::style::Color;

    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;

    // Diff lines
    pub const ADDED_BG: Color = Color::Rgb(35, 60, 35);
    pub const ADDED_FG: Color = Color::Rgb(120, 200, 120);
    pub const REMOVED_BG: Color = Color::Rgb(60, 35, 35);
    pub const REMOVED_FG: Color = Color::Rgb(200, 120, 120);
    pub const HUNK_HEADER_FG: Color = Color::Magenta;
    pub const META_FG: Color = Color::Cyan;

    // Bars
    pub const BAR_BG: Color = Color::Rgb(40, 44, 52);
    pub const BAR_FG: Color = Color::White;

    // File status glyphs
    pub const STAGED: Color = Color::Green;
    pub const UNSTAGED: Color = Color::Yellow;
    pub const UNTRACKED: Color = Color::Cyan;

    pub const CURSOR_BG: Color = Color::Rgb(80, 80, 100);
    pub const BORDER: Color = Color::DarkGray;
    pub const BORDER_FOCUS: Color = Color::Cyan;
    pub const POPUP_BG: Color = Color::Rgb(30, 34, 42);
    pub const MESSAGE: Color = Color::Yellow;
}

#[derive(Clone)]
pub struct Styles {
    // Header/Footer
    pub header: Style,
    pub header_dim: Style,
    pub footer: Style,
    pub footer_key: Style,
    pub message: Style,

    // Diff
    pub line_added: Style,
    pub line_removed: Style,
    pub line_context: Style,
    pub line_meta: Style,
    pub hunk_header: Style,
    pub scroll_indicator: Style,
    pub stats_added: Style,
    pub stats_removed: Style,

    // File list
    pub list_normal: Style,
    pub list_cursor: Style,
    pub checkbox_on: Style,
    pub status_staged: Style,
    pub status_unstaged: Style,
    pub status_untracked: Style,
    pub legend: Style,

    // Borders and panels
    pub border: Style,
    pub border_focus: Style,
    pub title: Style,
    pub popup: Style,
    pub value: Style,
    pub hint: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}

impl Styles {
    pub fn new() -> Self {
        Self {
            header: Style::default().bg(colors::BAR_BG).fg(colors::BAR_FG),
            header_dim: Style::default().bg(colors::BAR_BG).fg(colors::DIM),
            footer: Style::default().bg(colors::BAR_BG).fg(colors::DIM),
            footer_key: Style::default()
                .bg(colors::BAR_BG)
                .fg(colors::BAR_FG)
                .add_modifier(Modifier::BOLD),
            message: Style::default()
                .bg(colors::BAR_BG)
                .fg(colors::MESSAGE)
                .add_modifier(Modifier::BOLD),

            line_added: Style::default().bg(colors::ADDED_BG).fg(colors::ADDED_FG),
            line_removed: Style::default().bg(colors::REMOVED_BG).fg(colors::REMOVED_FG),
            line_context: Style::default().fg(colors::FG),
            line_meta: Style::default()
                .fg(colors::META_FG)
                .add_modifier(Modifier::BOLD),
            hunk_header: Style::default()
                .fg(colors::HUNK_HEADER_FG)
                .add_modifier(Modifier::ITALIC),
            scroll_indicator: Style::default().fg(colors::DIM),
            stats_added: Style::default()
                .fg(colors::STAGED)
                .add_modifier(Modifier::BOLD),
            stats_removed: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),

            list_normal: Style::default().fg(colors::FG),
            list_cursor: Style::default()
                .bg(colors::CURSOR_BG)
                .fg(colors::FG)
                .add_modifier(Modifier::BOLD),
            checkbox_on: Style::default()
                .fg(colors::STAGED)
                .add_modifier(Modifier::BOLD),
            status_staged: Style::default().fg(colors::STAGED),
            status_unstaged: Style::default().fg(colors::UNSTAGED),
            status_untracked: Style::default().fg(colors::UNTRACKED),
            legend: Style::default().fg(colors::DIM),

            border: Style::default().fg(colors::BORDER),
            border_focus: Style::default().fg(colors::BORDER_FOCUS),
            title: Style::default()
                .fg(colors::BORDER_FOCUS)
                .add_modifier(Modifier::BOLD),
            popup: Style::default().bg(colors::POPUP_BG).fg(colors::FG),
            value: Style::default().fg(colors::UNTRACKED),
            hint: Style::default().fg(colors::DIM),
        }
    }
}
