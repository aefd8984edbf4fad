//! Application state and core logic

use crate::backend::{BackendClient, BackendClientTrait};
use crate::config::AppConfig;
use crate::platform;
use crate::state::{AppState, EntryForm, Form, HomeAction, View};
use crate::wizard::cv::{WizardMode, CV_PROFILE_KEY, EXPORT_FUNCTION, PROFILES_TABLE};
use crate::wizard::job::JOBS_TABLE;
use crate::wizard::steps::FieldKind;
use crate::wizard::storage::DraftStore;
use crate::wizard::suggest::suggestions_for;
use crate::wizard::{ActiveWizard, CvWizard, JobWizard, StepOutcome, StepWizard, WizardKind};
use anyhow::Result;
use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Instant;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client for rows and remote functions
    backend: Box<dyn BackendClientTrait>,
    config: AppConfig,
    /// Where `config` is written back (new profile id)
    config_path: Option<PathBuf>,
    store: Option<DraftStore>,
    current_year: i32,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub async fn new(config: AppConfig) -> Result<Self> {
        let backend = BackendClient::new(&config)?;
        let config_path = AppConfig::config_path();
        Ok(Self::with_backend(config, Box::new(backend), config_path).await)
    }

    pub async fn with_backend(
        config: AppConfig,
        backend: Box<dyn BackendClientTrait>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let mut state = AppState::default();
        state.backend_connected = backend.check_connection().await;
        if !state.backend_connected {
            tracing::warn!("Backend not reachable, submissions will fail until it is");
        }
        let store = config.drafts_dir().map(DraftStore::new);

        Self {
            state,
            backend,
            config,
            config_path,
            store,
            current_year: chrono::Local::now().year(),
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    fn wizard(&self) -> Option<&dyn StepWizard> {
        self.state.wizard.as_ref().map(ActiveWizard::get)
    }

    fn with_wizard<T>(&mut self, f: impl FnOnce(&mut dyn StepWizard) -> T) -> Option<T> {
        self.state.wizard.as_mut().map(|w| f(w.get_mut()))
    }

    /// Periodic work from the main loop: write idle typed text through
    pub fn tick(&mut self, now: Instant) {
        let interval = self.config.flush_interval();
        self.with_wizard(|w| w.flush_if_idle(now, interval));
        self.collect_notice();
    }

    /// Commit pending input before the process exits
    pub fn shutdown(&mut self) {
        self.with_wizard(|w| w.blur());
    }

    fn collect_notice(&mut self) {
        if let Some(Some(notice)) = self.with_wizard(|w| w.take_notice()) {
            self.status_message = Some(notice);
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.status_message = None;

        match self.state.current_view {
            View::Home => self.handle_home_key(key).await?,
            View::Wizard if self.state.entry_form.is_some() => self.handle_entry_form_key(key),
            View::Wizard => self.handle_wizard_key(key).await?,
        }

        self.collect_notice();
        Ok(())
    }

    async fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.state.move_home_down(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => self.state.move_home_up(),
            KeyCode::Enter => self.activate(self.state.selected_home_action()),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    fn activate(&mut self, action: HomeAction) {
        match action {
            HomeAction::CreateCv => {
                let wizard = match &self.store {
                    Some(store) => CvWizard::with_store(store.clone(), self.current_year),
                    None => CvWizard::new(self.current_year),
                };
                tracing::info!("opening CV wizard");
                self.state.open_wizard(ActiveWizard::Cv(wizard));
            }
            HomeAction::EditLayout => self.start_layout_edit(),
            HomeAction::PostJob => {
                tracing::info!("opening job wizard");
                self.state.open_wizard(ActiveWizard::Job(JobWizard::new()));
            }
            HomeAction::Quit => self.quit = true,
        }
    }

    fn start_layout_edit(&mut self) {
        if self.config.profile_id.is_none() {
            self.push_error("Export your CV once before changing its layout.");
            return;
        }
        let Some(store) = &self.store else {
            self.push_error("No data directory available to read your profile from.");
            return;
        };
        match store.load(CV_PROFILE_KEY) {
            Ok(Some(profile)) => {
                tracing::info!("opening CV layout edit");
                let wizard = CvWizard::for_layout_edit(profile.data, self.current_year);
                self.state.open_wizard(ActiveWizard::Cv(wizard));
            }
            Ok(None) => self.push_error("Export your CV once before changing its layout."),
            Err(e) => {
                tracing::error!("Failed to load profile snapshot: {}", e);
                self.push_error(format!("Could not read your profile: {e}"));
            }
        }
    }

    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(wizard) = self.wizard() else {
            self.state.close_wizard();
            return Ok(());
        };
        let active_kind = wizard.active_field_spec().map(|f| f.kind);
        let preview = wizard.current_spec().is_preview();
        let max_scroll = wizard.preview_len().saturating_sub(1);
        let range = wizard.core().controller.range();
        let is_last = wizard.core().controller.is_last();

        let action = platform::is_action(key.modifiers);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let now = Instant::now();

        match key.code {
            KeyCode::Esc => self.leave_wizard(),
            KeyCode::Char('n') if action => self.go_next(),
            KeyCode::Char('p') if action => self.go_previous(),
            KeyCode::Char('g') if action => self.request_suggestions().await,
            KeyCode::Char('s') if action => self.submit().await,
            KeyCode::PageDown => self.go_next(),
            KeyCode::PageUp => self.go_previous(),
            KeyCode::Char(c) if alt => {
                if let Some(step) = c.to_digit(10).map(|d| d as u8).filter(|s| range.contains(*s)) {
                    self.go_to_step(step);
                }
            }
            KeyCode::Down | KeyCode::Char('j') if preview => self.state.scroll_down(max_scroll),
            KeyCode::Up | KeyCode::Char('k') if preview => self.state.scroll_up(),
            KeyCode::Enter if preview => {
                if is_last {
                    self.submit().await;
                } else {
                    self.go_next();
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.with_wizard(|w| w.next_field());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.with_wizard(|w| w.prev_field());
            }
            KeyCode::Left => {
                self.with_wizard(|w| w.cycle_active_choice(false));
            }
            KeyCode::Right => {
                self.with_wizard(|w| w.cycle_active_choice(true));
            }
            KeyCode::Enter => match active_kind {
                Some(FieldKind::Flag) => {
                    self.with_wizard(|w| w.toggle_active_flag());
                }
                Some(FieldKind::Choice(_)) => {
                    self.with_wizard(|w| w.cycle_active_choice(true));
                }
                Some(FieldKind::Records(_)) => self.open_entry_form(),
                Some(FieldKind::Multiline) => {
                    self.with_wizard(|w| w.input_char('\n', now));
                }
                _ => {
                    self.with_wizard(|w| w.next_field());
                }
            },
            KeyCode::Delete if matches!(active_kind, Some(FieldKind::Records(_))) => {
                self.remove_last_entry();
            }
            KeyCode::Char(' ') if active_kind == Some(FieldKind::Flag) => {
                self.with_wizard(|w| w.toggle_active_flag());
            }
            KeyCode::Backspace => {
                self.with_wizard(|w| w.input_backspace(now));
            }
            KeyCode::Char(c) if !action => {
                self.with_wizard(|w| w.input_char(c, now));
            }
            _ => {}
        }
        Ok(())
    }

    /// Back to the home menu. The CV draft is already persisted on every merge.
    fn leave_wizard(&mut self) {
        self.with_wizard(|w| w.blur());
        self.collect_notice();
        let kept_draft = matches!(
            &self.state.wizard,
            Some(ActiveWizard::Cv(cv))
                if cv.mode() == WizardMode::Full && self.store.is_some() && !cv.data().is_empty()
        );
        self.state.close_wizard();
        if kept_draft && self.status_message.is_none() {
            self.status_message = Some("Draft saved".to_string());
        }
    }

    fn go_next(&mut self) {
        if let Some(outcome) = self.with_wizard(|w| w.go_next()) {
            self.report(outcome);
        }
    }

    fn go_previous(&mut self) {
        if let Some(outcome) = self.with_wizard(|w| w.go_previous()) {
            self.report(outcome);
        }
    }

    fn go_to_step(&mut self, step: u8) {
        if let Some(outcome) = self.with_wizard(|w| w.go_to_step(step)) {
            self.report(outcome);
        }
    }

    fn report(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Moved(_) => self.state.scroll_offset = 0,
            StepOutcome::Blocked { step, errors } => {
                let current = self.wizard().map(|w| w.current_step());
                self.status_message = Some(if current == Some(step) {
                    format!("Please fix {} field(s) before continuing", errors.len())
                } else {
                    let title = self.wizard().map(|w| w.step_spec(step).title).unwrap_or("");
                    format!("Step {step} ({title}) is incomplete")
                });
            }
            StepOutcome::Unchanged => {}
        }
    }

    fn open_entry_form(&mut self) {
        let Some(spec) = self.wizard().and_then(|w| w.active_field_spec()) else {
            return;
        };
        if let FieldKind::Records(schema) = spec.kind {
            self.with_wizard(|w| w.blur());
            let title = format!("Add {} entry", spec.label.to_lowercase());
            self.state.entry_form = Some(EntryForm::from_schema(spec.key, &title, schema));
        }
    }

    fn remove_last_entry(&mut self) {
        let Some(spec) = self.wizard().and_then(|w| w.active_field_spec()) else {
            return;
        };
        let removed = self.with_wizard(|w| {
            let mut update = w.data().pick(&[spec.key]);
            let removed = update.remove_last_record(spec.key);
            if removed.is_some() {
                w.update(update);
            }
            removed
        });
        if let Some(Some(_)) = removed {
            self.status_message = Some(format!("Removed last {} entry", spec.label.to_lowercase()));
        }
    }

    fn handle_entry_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.entry_form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.entry_form = None,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Char('s') if platform::is_action(key.modifiers) => self.save_entry_form(),
            KeyCode::Enter => self.save_entry_form(),
            KeyCode::Backspace => form.get_active_field_mut().pop_char(),
            KeyCode::Char(c) if !platform::is_action(key.modifiers) => {
                form.get_active_field_mut().push_char(c)
            }
            _ => {}
        }
    }

    /// Append the sub-form's record to its list field (read-modify-write)
    fn save_entry_form(&mut self) {
        let Some(form) = self.state.entry_form.as_ref() else {
            return;
        };
        if !form.is_complete() {
            self.status_message = Some(format!("Missing: {}", form.missing_fields().join(", ")));
            return;
        }
        let target = form.target.clone();
        let record = form.to_record();
        self.with_wizard(|w| {
            let mut update = w.data().pick(&[target.as_str()]);
            update.append_record(&target, record);
            w.update(update);
        });
        self.state.entry_form = None;
        self.status_message = Some("Entry added".to_string());
    }

    async fn request_suggestions(&mut self) {
        self.with_wizard(|w| w.blur());
        let Some((kind, step)) = self.wizard().map(|w| (w.kind(), w.current_step())) else {
            return;
        };
        let suggestions = suggestions_for(kind, step);
        if suggestions.is_empty() {
            self.status_message = Some("No suggestions for this step".to_string());
            return;
        }

        let mut changed = 0;
        for suggestion in suggestions {
            let Some(data) = self.wizard().map(|w| w.data().clone()) else {
                return;
            };
            if !suggestion.is_applicable(&data) {
                continue;
            }
            let function = suggestion.function();
            let response = match self
                .backend
                .invoke_function(function, suggestion.request(kind, &data))
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(function, "Suggestion failed: {}", e);
                    self.push_error(format!("Suggestion failed: {e}"));
                    return;
                }
            };
            match suggestion.to_update(&data, response) {
                Ok(update) => {
                    changed += self.with_wizard(|w| w.update(update).len()).unwrap_or(0);
                }
                Err(e) => {
                    tracing::error!(function, "Unexpected suggestion response: {}", e);
                    self.push_error(format!("Unexpected answer from {function}: {e}"));
                    return;
                }
            }
        }

        self.status_message = Some(match changed {
            0 => "Nothing to suggest, your fields are already filled".to_string(),
            n => format!("Suggestions added to {n} field(s)"),
        });
    }

    /// Final submission of the active wizard. Every step of the active range
    /// must validate; the first failing step is shown instead.
    /// Remote commit of the wizard. Only the last step of the active range
    /// may submit.
    async fn submit(&mut self) {
        let Some(controller) = self.wizard().map(|w| w.core().controller) else {
            return;
        };
        if !controller.is_last() {
            self.status_message = Some(format!(
                "Submit is available on step {}",
                controller.range().last
            ));
            return;
        }
        self.with_wizard(|w| w.blur());
        let Some(failure) = self.wizard().map(|w| w.validate_all()) else {
            return;
        };
        if let Some((step, errors)) = failure {
            self.go_to_step(step);
            self.with_wizard(|w| w.core_mut().errors = errors.clone());
            self.status_message = Some(format!(
                "Step {step} is incomplete: {}",
                errors.iter().next().map(|(_, m)| m).unwrap_or("")
            ));
            return;
        }

        let layout_edit = matches!(
            &self.state.wizard,
            Some(ActiveWizard::Cv(cv)) if cv.mode() == WizardMode::LayoutEdit
        );
        match self.wizard().map(|w| w.kind()) {
            Some(WizardKind::Cv) if layout_edit => self.apply_layout().await,
            Some(WizardKind::Cv) => self.export_cv().await,
            Some(WizardKind::Job) => self.publish_job().await,
            None => {}
        }
    }

    async fn export_cv(&mut self) {
        let Some(ActiveWizard::Cv(cv)) = &self.state.wizard else {
            return;
        };
        let payload = cv.profile_payload();
        let data = cv.data().clone();

        let saved = match self.config.profile_id.clone() {
            Some(id) => self.backend.update_row(PROFILES_TABLE, &id, payload.clone()).await,
            None => self.backend.insert_row(PROFILES_TABLE, payload.clone()).await,
        };
        let row = match saved {
            Ok(row) => row,
            Err(e) => {
                tracing::error!("Failed to save profile: {}", e);
                self.push_error(format!("Could not save your profile: {e}"));
                return;
            }
        };
        let Some(profile_id) = row
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| self.config.profile_id.clone())
        else {
            self.push_error("The backend did not return a profile id");
            return;
        };
        self.remember_profile_id(&profile_id);

        let body = json!({ "profile_id": profile_id, "profile": payload });
        let url = match self.backend.invoke_function(EXPORT_FUNCTION, body).await {
            Ok(response) => response
                .get("url")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                tracing::error!("CV export failed: {}", e);
                self.push_error(format!("PDF export failed: {e}"));
                return;
            }
        };
        tracing::info!(profile_id = %profile_id, "CV exported");

        if let Some(store) = &self.store {
            if let Err(e) = store.save(CV_PROFILE_KEY, &data) {
                tracing::warn!("Failed to save profile snapshot: {}", e);
            }
        }
        if let Some(ActiveWizard::Cv(cv)) = &self.state.wizard {
            if let Err(e) = cv.clear_draft() {
                tracing::warn!("Failed to remove CV draft: {}", e);
            }
        }
        self.state.close_wizard();

        self.status_message = Some(if url.is_empty() {
            "CV exported".to_string()
        } else if self.copy_to_clipboard(&url).is_ok() {
            format!("CV exported, link copied: {url}")
        } else {
            format!("CV exported: {url}")
        });
    }

    async fn apply_layout(&mut self) {
        let (Some(ActiveWizard::Cv(cv)), Some(profile_id)) =
            (&self.state.wizard, self.config.profile_id.clone())
        else {
            return;
        };
        let patch = cv.layout_patch();
        let data = cv.data().clone();

        if let Err(e) = self.backend.update_row(PROFILES_TABLE, &profile_id, patch).await {
            tracing::error!("Failed to update layout: {}", e);
            self.push_error(format!("Could not change the layout: {e}"));
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(CV_PROFILE_KEY, &data) {
                tracing::warn!("Failed to save profile snapshot: {}", e);
            }
        }
        tracing::info!(profile_id = %profile_id, "CV layout updated");
        self.state.close_wizard();
        self.status_message = Some("Layout updated".to_string());
    }

    async fn publish_job(&mut self) {
        let Some(ActiveWizard::Job(job)) = &self.state.wizard else {
            return;
        };
        let payload = job.posting_payload(self.config.company_id.as_deref());

        match self.backend.insert_row(JOBS_TABLE, payload).await {
            Ok(row) => {
                let id = row.get("id").and_then(Value::as_str).unwrap_or("?");
                tracing::info!(job_id = id, "job published");
                self.status_message = Some(format!("Job published ({id})"));
                self.state.close_wizard();
            }
            Err(e) => {
                tracing::error!("Failed to publish job: {}", e);
                self.push_error(format!("Could not publish the job: {e}"));
            }
        }
    }

    fn remember_profile_id(&mut self, profile_id: &str) {
        if self.config.profile_id.as_deref() == Some(profile_id) {
            return;
        }
        self.config.profile_id = Some(profile_id.to_string());
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                tracing::warn!("Failed to store profile id: {}", e);
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
