//! Home menu

use crate::app::App;
use crate::config::{ENV_API_KEY, ENV_BACKEND_URL};
use crate::state::HomeAction;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HomeAction::ALL.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Recruit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let items: Vec<ListItem> = HomeAction::ALL
        .iter()
        .map(|action| ListItem::new(Line::from(Span::raw(action.label()))))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::BOTTOM))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.state.home_index));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let selected = app.state.selected_home_action();
    let mut lines = vec![Line::from(Span::styled(
        selected.description(),
        Style::default().fg(Color::Gray),
    ))];
    if !app.state.backend_connected {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Backend not reachable. Set {ENV_BACKEND_URL} and {ENV_API_KEY}."),
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[1]);
}
