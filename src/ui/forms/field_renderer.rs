//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Everything needed to draw one bordered input box
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub is_active: bool,
    pub is_multiline: bool,
    /// Accepts typed text (shows the cursor)
    pub editable: bool,
    pub error: Option<&'a str>,
}

/// Height a field needs: borders plus content lines
pub fn field_height(view: &FieldView) -> u16 {
    let lines = if view.is_multiline {
        view.value.lines().count().clamp(3, 6) as u16
    } else {
        1
    };
    lines + 2
}

/// Draw a form field. Invalid fields get a red border with the message in
/// the bottom border.
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let border_style = match (view.error.is_some(), view.is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let style = if view.is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display = if view.value.is_empty() && !view.is_active {
        "(empty)"
    } else {
        view.value
    };

    let cursor = if view.is_active && view.editable {
        "▌"
    } else {
        ""
    };

    let content = if view.is_multiline {
        let mut lines: Vec<Line> = display
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let mut block = Block::default()
        .title(format!(" {} ", view.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = view.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
