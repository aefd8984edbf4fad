//! Step wizards
//!
//! A wizard is a central [`FormData`] record, a step pointer owned by a
//! [`StepController`], and a per-step validator. Both wizards share the
//! navigation, merge and staged-input logic through [`StepWizard`]; they only
//! differ in their step catalogue, their validation rules and their merge hook.

pub mod controller;
pub mod cv;
pub mod debounce;
pub mod derive;
pub mod job;
pub mod steps;
pub mod storage;
pub mod suggest;
pub mod validation;

use std::time::{Duration, Instant};

use crate::state::{FieldValue, FormData};
pub use controller::{StepController, StepOutcome, StepRange};
pub use cv::CvWizard;
use debounce::StagedInput;
pub use job::JobWizard;
use steps::{cycle_choice, FieldKind, FieldSpec, StepSpec};
pub use validation::ValidationErrors;

/// Which wizard is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardKind {
    Cv,
    Job,
}

/// State shared by every wizard
#[derive(Debug, Clone)]
pub struct WizardCore {
    pub controller: StepController,
    pub data: FormData,
    /// Errors of the last blocked navigation on the current step
    pub errors: ValidationErrors,
    /// Index into the visible fields of the current step
    pub active_field: usize,
    pub staged: Option<StagedInput>,
    /// One-shot message for the status line (e.g. a failed draft save)
    pub notice: Option<String>,
}

impl WizardCore {
    pub fn new(range: StepRange, data: FormData) -> Self {
        Self {
            controller: StepController::new(range),
            data,
            errors: ValidationErrors::new(),
            active_field: 0,
            staged: None,
            notice: None,
        }
    }
}

pub trait StepWizard {
    fn core(&self) -> &WizardCore;
    fn core_mut(&mut self) -> &mut WizardCore;
    fn kind(&self) -> WizardKind;
    fn title(&self) -> &'static str;
    /// Full step catalogue, indexed by `step - 1`
    fn steps(&self) -> &'static [StepSpec];
    /// Pure validation of one step against the current data
    fn validate_step(&self, step: u8) -> ValidationErrors;
    /// Runs after every merge that changed something
    fn after_merge(&mut self) {}

    fn data(&self) -> &FormData {
        &self.core().data
    }

    fn current_step(&self) -> u8 {
        self.core().controller.current_step()
    }

    fn step_spec(&self, step: u8) -> &'static StepSpec {
        let steps = self.steps();
        let index = usize::from(step.saturating_sub(1)).min(steps.len() - 1);
        &steps[index]
    }

    fn current_spec(&self) -> &'static StepSpec {
        self.step_spec(self.current_step())
    }

    fn visible_fields(&self) -> Vec<&'static FieldSpec> {
        self.current_spec().visible_fields(self.data())
    }

    fn active_field_spec(&self) -> Option<&'static FieldSpec> {
        let fields = self.visible_fields();
        if fields.is_empty() {
            return None;
        }
        let index = self.core().active_field.min(fields.len() - 1);
        Some(fields[index])
    }

    fn errors(&self) -> &ValidationErrors {
        &self.core().errors
    }

    fn progress(&self) -> f64 {
        self.core().controller.progress()
    }

    /// Lines of the preview: a heading, the visible fields and a blank line
    /// per data step
    fn preview_len(&self) -> usize {
        self.steps()
            .iter()
            .filter(|s| !s.is_preview())
            .map(|s| s.visible_fields(self.data()).len() + 2)
            .sum()
    }

    fn take_notice(&mut self) -> Option<String> {
        self.core_mut().notice.take()
    }

    /// Merge a partial update into the shared data
    fn update(&mut self, partial: FormData) -> Vec<String> {
        let changed = self.core_mut().data.merge(partial);
        if !changed.is_empty() {
            tracing::trace!(fields = ?changed, "form data updated");
            self.after_merge();
        }
        changed
    }

    fn set_field(&mut self, key: &str, value: FieldValue) -> Vec<String> {
        self.update(FormData::from_iter([(key, value)]))
    }

    /// Validate every step of the active range; first failing step wins
    fn validate_all(&self) -> Option<(u8, ValidationErrors)> {
        let range = self.core().controller.range();
        (range.first..=range.last)
            .map(|step| (step, self.validate_step(step)))
            .find(|(_, errors)| !errors.is_empty())
    }

    fn go_next(&mut self) -> StepOutcome {
        self.flush_staged();
        let mut controller = self.core().controller;
        let outcome = controller.go_next(|step| self.validate_step(step));
        self.apply_navigation(controller, &outcome);
        outcome
    }

    fn go_previous(&mut self) -> StepOutcome {
        self.flush_staged();
        let mut controller = self.core().controller;
        let outcome = controller.go_previous();
        self.apply_navigation(controller, &outcome);
        outcome
    }

    fn go_to_step(&mut self, step: u8) -> StepOutcome {
        self.flush_staged();
        let mut controller = self.core().controller;
        let outcome = controller.go_to_step(step, |s| self.validate_step(s));
        self.apply_navigation(controller, &outcome);
        outcome
    }

    fn apply_navigation(&mut self, controller: StepController, outcome: &StepOutcome) {
        let core = self.core_mut();
        let previous = core.controller.current_step();
        core.controller = controller;
        match outcome {
            StepOutcome::Moved(step) => {
                tracing::debug!(from = previous, to = step, "wizard step changed");
                core.errors = ValidationErrors::new();
                core.active_field = 0;
                core.staged = None;
            }
            StepOutcome::Blocked { step, errors } if *step == previous => {
                core.errors = errors.clone();
            }
            StepOutcome::Blocked { .. } | StepOutcome::Unchanged => {}
        }
    }

    /// Write a pending staged value through immediately (blur / navigation)
    fn flush_staged(&mut self) {
        let pending = self.core_mut().staged.as_mut().and_then(StagedInput::take);
        if let Some((key, value)) = pending {
            self.set_field(&key, value);
        }
    }

    /// Write a pending staged value through if it has been idle long enough
    fn flush_if_idle(&mut self, now: Instant, interval: Duration) -> bool {
        let pending = self
            .core_mut()
            .staged
            .as_mut()
            .and_then(|s| s.take_if_due(now, interval));
        match pending {
            Some((key, value)) => {
                self.set_field(&key, value);
                true
            }
            None => false,
        }
    }

    fn next_field(&mut self) {
        self.blur();
        let count = self.visible_fields().len().max(1);
        let core = self.core_mut();
        core.active_field = (core.active_field + 1) % count;
    }

    fn prev_field(&mut self) {
        self.blur();
        let count = self.visible_fields().len().max(1);
        let core = self.core_mut();
        core.active_field = if core.active_field == 0 {
            count - 1
        } else {
            (core.active_field - 1).min(count - 1)
        };
    }

    /// Leave the active text field, committing what was typed
    fn blur(&mut self) {
        self.flush_staged();
        self.core_mut().staged = None;
    }

    /// Staged input for the active field, started on demand
    fn staged_for_active(&mut self, now: Instant) -> Option<&mut StagedInput> {
        let spec = self.active_field_spec()?;
        if !spec.kind.is_text_input() {
            return None;
        }
        let needs_begin = self
            .core()
            .staged
            .as_ref()
            .map_or(true, |s| s.key() != spec.key);
        if needs_begin {
            self.flush_staged();
            let initial = spec.kind.edit_buffer(self.data().get(spec.key));
            self.core_mut().staged = Some(StagedInput::begin(spec.key, spec.kind, initial, now));
        }
        self.core_mut().staged.as_mut()
    }

    fn input_char(&mut self, c: char, now: Instant) {
        if let Some(staged) = self.staged_for_active(now) {
            staged.push_char(c, now);
        }
    }

    fn input_backspace(&mut self, now: Instant) {
        if let Some(staged) = self.staged_for_active(now) {
            staged.pop_char(now);
        }
    }

    /// Space/Enter on a flag field
    fn toggle_active_flag(&mut self) -> bool {
        match self.active_field_spec() {
            Some(spec) if spec.kind == FieldKind::Flag => {
                let value = !self.data().flag(spec.key);
                self.set_field(spec.key, FieldValue::Flag(value));
                true
            }
            _ => false,
        }
    }

    /// Left/Right on a choice field
    fn cycle_active_choice(&mut self, forward: bool) -> bool {
        match self.active_field_spec() {
            Some(FieldSpec {
                key,
                kind: FieldKind::Choice(options),
                ..
            }) => {
                let next = cycle_choice(options, self.data().text(key), forward);
                self.set_field(key, FieldValue::text(next));
                true
            }
            _ => false,
        }
    }

    /// Text shown for a field, including not-yet-flushed keystrokes
    fn display_value(&self, spec: &FieldSpec) -> String {
        if let Some(staged) = self.core().staged.as_ref().filter(|s| s.key() == spec.key) {
            return staged.value().to_string();
        }
        match self.data().get(spec.key) {
            Some(value) => value.display_value(),
            None => String::new(),
        }
    }
}

/// The wizard currently shown
#[derive(Debug, Clone)]
pub enum ActiveWizard {
    Cv(CvWizard),
    Job(JobWizard),
}

impl ActiveWizard {
    pub fn get(&self) -> &dyn StepWizard {
        match self {
            ActiveWizard::Cv(w) => w,
            ActiveWizard::Job(w) => w,
        }
    }

    pub fn get_mut(&mut self) -> &mut dyn StepWizard {
        match self {
            ActiveWizard::Cv(w) => w,
            ActiveWizard::Job(w) => w,
        }
    }
}
