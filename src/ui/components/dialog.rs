//! Modal error dialog

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;
/// Border plus one column of padding on each side
const HORIZONTAL_CHROME: u16 = 4;
/// "Press Enter or Esc to dismiss"
const HINT_WIDTH: usize = 29;

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let max_width = MAX_WIDTH.min(area.width);
    let lines = wrap_text(message, max_width.saturating_sub(HORIZONTAL_CHROME) as usize);

    let text_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(HINT_WIDTH) as u16;
    let width = (text_width + HORIZONTAL_CHROME).min(max_width);
    // Borders, the message and a blank line plus the hint
    let height = (lines.len() as u16 + 4).min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut content: Vec<Line> = lines.into_iter().map(Line::from).collect();
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ]));

    let dialog = Paragraph::new(content).block(
        Block::default()
            .title(Span::styled(
                " Error ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(dialog, dialog_area);
}

/// Greedy word wrap; explicit newlines start a new line
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if !current.is_empty() && needed > max_width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}
