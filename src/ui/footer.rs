//! Footer rendering
//!
//! Displays keybinding hints, or a status message when one is pending.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::Styles;

/// Key hints for the file selector
pub const SELECTOR_HINTS: &[(&str, &str)] = &[
    ("↑↓/jk", "move"),
    ("space", "toggle"),
    ("←→/hl", "scroll"),
    ("PgUp/PgDn", "page"),
    ("enter", "confirm"),
    ("q/esc", "cancel"),
];

/// Footer widget showing keybinding hints
pub struct Footer<'a> {
    pub hints: &'a [(&'a str, &'a str)],
    /// Replaces the hints when set
    pub message: Option<&'a str>,
    pub styles: &'a Styles,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(self.styles.footer);
        }

        let mut spans = vec![Span::styled(" ", self.styles.footer)];

        if let Some(message) = self.message {
            spans.push(Span::styled(message, self.styles.message));
        } else {
            for (i, (key, desc)) in self.hints.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", self.styles.footer));
                }
                spans.push(Span::styled(*key, self.styles.footer_key));
                spans.push(Span::styled(format!(" {}", desc), self.styles.footer));
            }
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// Render the footer bar
pub fn render_footer(
    buf: &mut Buffer,
    area: Rect,
    hints: &[(&str, &str)],
    message: Option<&str>,
    styles: &Styles,
) {
    let footer = Footer {
        hints,
        message,
        styles,
    };
    footer.render(area, buf);
}
