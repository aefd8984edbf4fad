//! Application state definitions

use std::collections::VecDeque;

use super::forms::EntryForm;
use crate::wizard::ActiveWizard;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Wizard,
}

/// Entries of the home menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    CreateCv,
    EditLayout,
    PostJob,
    Quit,
}

impl HomeAction {
    pub const ALL: [HomeAction; 4] = [
        HomeAction::CreateCv,
        HomeAction::EditLayout,
        HomeAction::PostJob,
        HomeAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HomeAction::CreateCv => "Create CV",
            HomeAction::EditLayout => "Change CV layout",
            HomeAction::PostJob => "Post a job",
            HomeAction::Quit => "Quit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HomeAction::CreateCv => "Seven steps from branch to PDF export. Your draft is kept.",
            HomeAction::EditLayout => "Pick a new layout for the CV you already exported.",
            HomeAction::PostJob => "Describe an open position and publish it.",
            HomeAction::Quit => "Leave the application.",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub home_index: usize,
    pub wizard: Option<ActiveWizard>,
    /// Record entry sub-form shown above the wizard
    pub entry_form: Option<EntryForm>,
    pub backend_connected: bool,
    /// Scroll position of the preview step
    pub scroll_offset: usize,
    errors: VecDeque<String>,
}

impl AppState {
    pub fn selected_home_action(&self) -> HomeAction {
        HomeAction::ALL[self.home_index.min(HomeAction::ALL.len() - 1)]
    }

    pub fn move_home_down(&mut self) {
        self.home_index = (self.home_index + 1) % HomeAction::ALL.len();
    }

    pub fn move_home_up(&mut self) {
        self.home_index = match self.home_index {
            0 => HomeAction::ALL.len() - 1,
            i => i - 1,
        };
    }

    pub fn open_wizard(&mut self, wizard: ActiveWizard) {
        self.wizard = Some(wizard);
        self.entry_form = None;
        self.scroll_offset = 0;
        self.current_view = View::Wizard;
    }

    pub fn close_wizard(&mut self) {
        self.wizard = None;
        self.entry_form = None;
        self.current_view = View::Home;
    }

    /// Scroll one line down, never past `max_offset`
    pub fn scroll_down(&mut self, max_offset: usize) {
        self.scroll_offset = (self.scroll_offset + 1).min(max_offset);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
