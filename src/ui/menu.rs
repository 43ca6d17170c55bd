//! Popup panels for the configuration editor
//!
//! Menus, the text entry box and the save prompt, all drawn as centered
//! overlays.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::Styles;

/// A menu row: label plus the current value, if it has one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub value: Option<String>,
}

impl MenuItem {
    pub fn action(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: None,
        }
    }

    pub fn setting(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: Some(value.into()),
        }
    }
}

fn render_centered_popup(buf: &mut Buffer, area: Rect, width: u16, height: u16, title: &str, styles: &Styles) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(popup_area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border_focus)
        .title(Span::styled(format!(" {} ", title), styles.title))
        .style(styles.popup);

    let inner = block.inner(popup_area);
    block.render(popup_area, buf);
    inner
}

/// Render a menu with the cursor row highlighted
pub fn render_menu(buf: &mut Buffer, area: Rect, title: &str, items: &[MenuItem], cursor: usize, styles: &Styles) {
    let label_width = items.iter().map(|i| i.label.width()).max().unwrap_or(0);
    let height = items.len() as u16 + 2;
    let inner = render_centered_popup(buf, area, 56, height, title, styles);

    for (i, item) in items.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break;
        }

        let is_cursor = i == cursor;
        let style = if is_cursor {
            styles.list_cursor
        } else {
            styles.popup
        };
        let marker = if is_cursor { "> " } else { "  " };

        let mut spans = vec![
            Span::styled(marker, style),
            Span::styled(format!("{:<width$}", item.label, width = label_width), style),
        ];
        if let Some(value) = &item.value {
            spans.push(Span::styled("  ", style));
            spans.push(Span::styled(value.clone(), style.patch(styles.value)));
        }

        if is_cursor {
            for x in inner.x..inner.x + inner.width {
                buf[(x, y)].set_style(style);
            }
        }
        buf.set_line(inner.x, y, &Line::from(spans), inner.width);
    }
}

/// Render a single-line text entry box
pub fn render_text_entry(buf: &mut Buffer, area: Rect, title: &str, shown: &str, styles: &Styles) {
    let inner = render_centered_popup(buf, area, 64, 5, title, styles);
    if inner.height == 0 {
        return;
    }

    // Keep the end of long input visible
    let room = (inner.width as usize).saturating_sub(3);
    let skip = shown.chars().count().saturating_sub(room);
    let visible: String = shown.chars().skip(skip).collect();

    buf.set_line(
        inner.x,
        inner.y,
        &Line::from(vec![
            Span::styled("> ", styles.title),
            Span::styled(format!("{}█", visible), styles.popup),
        ]),
        inner.width,
    );
    if inner.height > 2 {
        buf.set_line(
            inner.x,
            inner.y + 2,
            &Line::styled("enter apply │ esc cancel │ ctrl+u clear │ ctrl+v paste", styles.hint),
            inner.width,
        );
    }
}

/// Render a yes/no question
pub fn render_confirm(buf: &mut Buffer, area: Rect, question: &str, styles: &Styles) {
    let inner = render_centered_popup(buf, area, 48, 5, "Confirm", styles);
    if inner.height == 0 {
        return;
    }

    buf.set_line(inner.x, inner.y, &Line::styled(format!(" {}", question), styles.popup), inner.width);
    if inner.height > 2 {
        buf.set_line(
            inner.x,
            inner.y + 2,
            &Line::styled(" y/enter save │ n/q discard │ esc back", styles.hint),
            inner.width,
        );
    }
}
