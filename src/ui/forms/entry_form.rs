//! Record entry sub-form, drawn centered over the wizard

use super::field_renderer::{draw_field, FieldView};
use crate::state::{EntryForm, Form};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear},
    Frame,
};

const FORM_WIDTH: u16 = 56;
const FIELD_HEIGHT: u16 = 3;

pub fn draw_entry_form(frame: &mut Frame, form: &EntryForm) {
    let area = frame.area();
    let height = (form.field_count() as u16 * FIELD_HEIGHT + 2).min(area.height);
    let width = FORM_WIDTH.min(area.width);
    let form_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, form_area);
    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(FIELD_HEIGHT); form.field_count()])
        .split(inner);

    for (index, chunk) in chunks.iter().enumerate() {
        let Some(field) = form.get_field(index) else {
            continue;
        };
        let label = field.display_label();
        draw_field(
            frame,
            *chunk,
            &FieldView {
                label: &label,
                value: field.as_text(),
                is_active: index == form.active_field(),
                is_multiline: false,
                editable: true,
                error: None,
            },
        );
    }
}
