//! Reusable UI widgets
//!
//! Contains common UI components used across tabs:
//! - Popup dialogs (form, error)
//! - Flash messages and the status bar

use crate::form::Form;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, &str)], // (label, key)
    width: u16,
    theme: &Theme,
    area: Rect,
) {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content_area = Rect {
        x: inner.x + 1,
        y: inner.y + 1,
        width: inner.width.saturating_sub(2),
        height: inner.height.saturating_sub(3),
    };
    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, content_area);

    if buttons.is_empty() {
        return;
    }

    let button_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(1),
        width: inner.width,
        height: 1,
    };

    let key_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (i, (label, key)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("    "));
        }
        spans.push(Span::styled("[", theme.text_dim()));
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled("] ", theme.text_dim()));
        spans.push(Span::styled(*label, theme.text()));
    }

    let buttons_widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(buttons_widget, button_area);
}

/// Render a data-entry form
pub fn render_form_popup(frame: &mut Frame, form: &Form, theme: &Theme, area: Rect) {
    let label_width = form.fields.iter().map(|f| f.label.len()).max().unwrap_or(0);

    let mut content: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focus;
            let label = format!("{:<width$} ", field.label, width = label_width);
            let value = if focused {
                format!("{}_", field.value)
            } else {
                field.value.clone()
            };
            Line::from(vec![
                Span::styled(label, if focused { theme.title() } else { theme.text_dim() }),
                Span::styled(value, if focused { theme.selected() } else { theme.text() }),
            ])
        })
        .collect();

    content.push(Line::raw(""));
    match &form.error {
        Some(error) => content.push(Line::styled(format!("✗ {}", error), theme.error())),
        None => content.push(Line::raw("")),
    }

    render_popup(
        frame,
        form.kind.title(),
        content,
        &[("Next", "Tab"), ("Save", "Ctrl-S"), ("Cancel", "Esc")],
        (label_width as u16).saturating_add(40),
        theme,
        area,
    );
}

/// Render an error popup
pub fn render_error_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![Line::styled(message.to_string(), theme.error())];
    render_popup(frame, title, content, &[("OK", "o")], 56, theme, area);
}

/// Render a flash message on the bottom line
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);
    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]));
    frame.render_widget(flash, flash_area);
}

/// Render the status bar with key hints on the left
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    frame.render_widget(Clear, status_area);

    frame.render_widget(
        Paragraph::new(left_content).style(theme.text_dim()),
        status_area,
    );

    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(right_content).style(theme.text_dim()),
        right_area,
    );
}

/// Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup, Rect::new(30, 15, 40, 20));
    }

    #[test]
    fn test_centered_rect_larger_than_area() {
        let area = Rect::new(5, 5, 10, 10);
        let popup = centered_rect(40, 20, area);
        assert_eq!((popup.x, popup.y), (5, 5));
    }
}
