//! Step navigation controller
//!
//! Owns the current step pointer of a wizard. The pointer always stays within
//! the active [`StepRange`]; forward moves are gated by a validation callback,
//! backward moves never are.

use super::validation::ValidationErrors;

/// Inclusive range of reachable steps (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRange {
    pub first: u8,
    pub last: u8,
}

impl StepRange {
    pub const fn new(first: u8, last: u8) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, step: u8) -> bool {
        (self.first..=self.last).contains(&step)
    }

    /// Number of steps in the range
    pub fn len(&self) -> u8 {
        self.last - self.first + 1
    }

    pub fn clamp(&self, step: u8) -> u8 {
        step.clamp(self.first, self.last)
    }
}

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The pointer moved to the given step
    Moved(u8),
    /// Validation of `step` failed; the pointer did not move
    Blocked {
        step: u8,
        errors: ValidationErrors,
    },
    /// Already at the boundary of the active range
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    current: u8,
    range: StepRange,
}

impl StepController {
    /// Start at the first step of `range`
    pub fn new(range: StepRange) -> Self {
        Self {
            current: range.first,
            range,
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current
    }

    pub fn range(&self) -> StepRange {
        self.range
    }

    pub fn is_first(&self) -> bool {
        self.current == self.range.first
    }

    pub fn is_last(&self) -> bool {
        self.current == self.range.last
    }

    /// Switch the reachable range (e.g. entering layout edit), moving the
    /// pointer to `start` clamped into the new range
    pub fn set_range(&mut self, range: StepRange, start: u8) {
        self.range = range;
        self.current = range.clamp(start);
    }

    /// Validate the current step and advance by one, clamped to the range
    pub fn go_next(&mut self, validate: impl Fn(u8) -> ValidationErrors) -> StepOutcome {
        if self.is_last() {
            return StepOutcome::Unchanged;
        }
        let errors = validate(self.current);
        if !errors.is_empty() {
            return StepOutcome::Blocked {
                step: self.current,
                errors,
            };
        }
        self.current += 1;
        StepOutcome::Moved(self.current)
    }

    /// Go back by one; no validation
    pub fn go_previous(&mut self) -> StepOutcome {
        if self.is_first() {
            return StepOutcome::Unchanged;
        }
        self.current -= 1;
        StepOutcome::Moved(self.current)
    }

    /// Direct jump from the progress indicator. Backward jumps are free;
    /// a forward jump requires every step from the current one up to the
    /// step before the target to validate.
    pub fn go_to_step(&mut self, target: u8, validate: impl Fn(u8) -> ValidationErrors) -> StepOutcome {
        let target = self.range.clamp(target);
        if target == self.current {
            return StepOutcome::Unchanged;
        }
        if target > self.current {
            for step in self.current..target {
                let errors = validate(step);
                if !errors.is_empty() {
                    return StepOutcome::Blocked { step, errors };
                }
            }
        }
        self.current = target;
        StepOutcome::Moved(target)
    }

    /// Progress in percent, relative to the active range:
    /// `(current - first) / len * 100`
    pub fn progress(&self) -> f64 {
        let relative = f64::from(self.current - self.range.first);
        relative / f64::from(self.range.len()) * 100.0
    }

    /// 1-based position within the active range, for "step x of y" labels
    pub fn position(&self) -> (u8, u8) {
        (self.current - self.range.first + 1, self.range.len())
    }
}
