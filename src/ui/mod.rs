//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;
mod wizard;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    // Draw main content based on current view
    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app),
        View::Wizard => match app.state.wizard.as_ref() {
            Some(active) => wizard::draw(frame, main_area, active.get(), app.state.scroll_offset),
            None => home::draw(frame, main_area, app),
        },
    }

    // Record entry sub-form above the wizard
    if let Some(form) = &app.state.entry_form {
        forms::draw_entry_form(frame, form);
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Error dialog is modal and drawn last
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
