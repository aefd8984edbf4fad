//! Wizard view: header with progress, the current step's fields or the
//! preview of everything entered so far

use super::forms::{draw_field, field_height, FieldView};
use crate::state::{FieldValue, Record};
use crate::wizard::steps::{FieldKind, FieldSpec, RecordField};
use crate::wizard::StepWizard;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, wizard: &dyn StepWizard, scroll_offset: usize) {
    let block = Block::default()
        .title(format!(" {} ", wizard.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Step indicator
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Step content
        ])
        .split(inner);

    draw_step_indicator(frame, chunks[0], wizard);

    let progress = wizard.progress().clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(progress / 100.0)
        .label(format!("{progress:.0}%"));
    frame.render_widget(gauge, chunks[1]);

    if wizard.current_spec().is_preview() {
        draw_preview(frame, chunks[3], wizard, scroll_offset);
    } else {
        draw_fields(frame, chunks[3], wizard);
    }
}

fn draw_step_indicator(frame: &mut Frame, area: Rect, wizard: &dyn StepWizard) {
    let range = wizard.core().controller.range();
    let (position, total) = wizard.core().controller.position();
    let current = wizard.current_step();

    let mut spans = vec![Span::styled(
        format!("Step {position} of {total}  "),
        Style::default().fg(Color::Gray),
    )];
    for step in range.first..=range.last {
        let style = if step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = if step == current {
            format!("{step} {}", wizard.step_spec(step).title)
        } else {
            step.to_string()
        };
        spans.push(Span::styled(title, style));
        if step != range.last {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_fields(frame: &mut Frame, area: Rect, wizard: &dyn StepWizard) {
    let fields = wizard.visible_fields();
    let active = wizard.core().active_field.min(fields.len().saturating_sub(1));

    let values: Vec<String> = fields.iter().map(|f| field_value(wizard, f)).collect();
    let labels: Vec<String> = fields.iter().map(|f| field_label(wizard, f)).collect();
    let views: Vec<FieldView> = fields
        .iter()
        .zip(values.iter().zip(&labels))
        .enumerate()
        .map(|(index, (spec, (value, label)))| FieldView {
            label,
            value,
            is_active: index == active,
            is_multiline: spec.kind.is_multiline() || matches!(spec.kind, FieldKind::Records(_)),
            editable: spec.kind.is_text_input(),
            error: wizard.errors().get(spec.key),
        })
        .collect();

    // Scroll so the active field stays on screen
    let heights: Vec<u16> = views.iter().map(field_height).collect();
    let mut first = 0;
    while first < active && heights[first..=active].iter().sum::<u16>() > area.height {
        first += 1;
    }

    let mut y = area.y;
    for (view, height) in views.iter().zip(&heights).skip(first) {
        if y + height > area.y + area.height {
            break;
        }
        draw_field(
            frame,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: *height,
            },
            view,
        );
        y += height;
    }
}

/// Required fields are starred; a dot marks typed text not yet written through
fn field_label(wizard: &dyn StepWizard, spec: &FieldSpec) -> String {
    let pending = wizard
        .core()
        .staged
        .as_ref()
        .is_some_and(|s| s.key() == spec.key && s.is_dirty());
    match (spec.required, pending) {
        (true, true) => format!("{} * •", spec.label),
        (true, false) => format!("{} *", spec.label),
        (false, true) => format!("{} •", spec.label),
        (false, false) => spec.label.to_string(),
    }
}

/// Text shown inside a field box
fn field_value(wizard: &dyn StepWizard, spec: &FieldSpec) -> String {
    match spec.kind {
        FieldKind::Flag => {
            if wizard.data().flag(spec.key) {
                "[x] yes".to_string()
            } else {
                "[ ] no".to_string()
            }
        }
        FieldKind::Choice(_) => match wizard.data().text(spec.key) {
            "" => "◂ choose with ←/→ ▸".to_string(),
            value => format!("◂ {value} ▸"),
        },
        FieldKind::Records(schema) => {
            let records = wizard.data().records(spec.key);
            let mut lines: Vec<String> = records
                .iter()
                .map(|r| format!("• {}", record_summary(r, schema)))
                .collect();
            lines.push("Enter: add entry  Del: remove last".to_string());
            lines.join("\n")
        }
        _ => wizard.display_value(spec),
    }
}

fn record_summary(record: &Record, schema: &[RecordField]) -> String {
    let text = |key: &str| record.get(key).map(String::as_str).unwrap_or("").trim();
    let names: Vec<&str> = schema
        .iter()
        .filter(|f| !f.is_year)
        .map(|f| text(f.key))
        .filter(|v| !v.is_empty())
        .collect();
    let years = match (text("start_year"), text("end_year")) {
        ("", "") => String::new(),
        (start, "") => format!(" ({start}–)"),
        ("", end) => format!(" (–{end})"),
        (start, end) => format!(" ({start}–{end})"),
    };
    format!("{}{years}", names.join(", "))
}

fn preview_value(value: &FieldValue, spec: &FieldSpec) -> String {
    match (value, spec.kind) {
        (FieldValue::Flag(true), _) => "yes".to_string(),
        (FieldValue::Flag(false), _) => "no".to_string(),
        (FieldValue::Records(records), FieldKind::Records(schema)) => records
            .iter()
            .map(|r| record_summary(r, schema))
            .collect::<Vec<_>>()
            .join("; "),
        _ => value.display_value(),
    }
}

/// Everything entered so far, grouped by step
fn draw_preview(frame: &mut Frame, area: Rect, wizard: &dyn StepWizard, scroll_offset: usize) {
    let data = wizard.data();
    let mut lines = Vec::new();

    for step in wizard.steps().iter().filter(|s| !s.is_preview()) {
        lines.push(Line::from(Span::styled(
            format!("{}. {}", step.number, step.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for spec in step.visible_fields(data) {
            let value = match data.get(spec.key) {
                Some(value) if !value.is_empty() => preview_value(value, spec),
                _ => "-".to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", spec.label), Style::default().fg(Color::Gray)),
                Span::raw(value),
            ]));
        }
        lines.push(Line::from(""));
    }

    let offset = scroll_offset.min(lines.len().saturating_sub(1));
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Preview ").borders(Borders::TOP))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::record;
    use crate::wizard::steps::EDUCATION_FIELDS;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_summary_with_years() {
        let entry = record([
            ("institution", "IGS Mitte"),
            ("degree", "Abitur"),
            ("start_year", "2018"),
            ("end_year", "2024"),
        ]);
        assert_eq!(
            record_summary(&entry, &EDUCATION_FIELDS),
            "IGS Mitte, Abitur (2018–2024)"
        );
    }

    #[test]
    fn test_record_summary_open_ended() {
        let entry = record([("institution", "BBS II"), ("degree", "Ausbildung"), ("start_year", "2025")]);
        assert_eq!(
            record_summary(&entry, &EDUCATION_FIELDS),
            "BBS II, Ausbildung (2025–)"
        );
    }
}
