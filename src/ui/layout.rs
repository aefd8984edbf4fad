//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{jump_shortcut, SUBMIT_SHORTCUT, SUGGEST_SHORTCUT};
use crate::state::View;
use crate::wizard::StepWizard;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Content area above the one-line status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.backend_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    if app.state.has_errors() {
        return "Enter/Esc:dismiss".to_string();
    }
    if app.state.entry_form.is_some() {
        return "Tab:next  Enter:add  Esc:cancel".to_string();
    }
    match app.state.current_view {
        View::Home => "j/k:nav  Enter:select  q:quit".to_string(),
        View::Wizard => {
            let jump = match &app.state.wizard {
                Some(active) => {
                    let range = active.get().core().controller.range();
                    format!("{}:jump  ", jump_shortcut(range.first, range.last))
                }
                None => String::new(),
            };
            format!(
                "Tab:field  PgDn/PgUp:step  {jump}{SUGGEST_SHORTCUT}:suggest  {SUBMIT_SHORTCUT}:submit  Esc:back"
            )
        }
    }
}
