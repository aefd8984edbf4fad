//! Staged text input
//!
//! Keystrokes go into a local buffer instead of the shared form data. The
//! buffer is written through when the field loses focus, before navigation,
//! or once no key has been pressed for the flush interval. A later keystroke
//! simply replaces the pending write.

use std::time::{Duration, Instant};

use super::steps::FieldKind;
use crate::state::FieldValue;

/// Default idle time before a staged value is flushed
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct StagedInput {
    key: String,
    kind: FieldKind,
    buffer: String,
    last_edit: Instant,
    dirty: bool,
}

impl StagedInput {
    /// Start editing `key` from its current text representation
    pub fn begin(key: &str, kind: FieldKind, initial: String, now: Instant) -> Self {
        Self {
            key: key.to_string(),
            kind,
            buffer: initial,
            last_edit: now,
            dirty: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.buffer.push(c);
        self.touch(now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        if self.buffer.pop().is_some() {
            self.touch(now);
        }
    }

    fn touch(&mut self, now: Instant) {
        self.last_edit = now;
        self.dirty = true;
    }

    /// Whether a pending write has been idle for at least `interval`
    pub fn is_due(&self, now: Instant, interval: Duration) -> bool {
        self.dirty && now.saturating_duration_since(self.last_edit) >= interval
    }

    /// Take the pending write if it is due. The buffer stays active so the
    /// user can keep typing.
    pub fn take_if_due(&mut self, now: Instant, interval: Duration) -> Option<(String, FieldValue)> {
        if self.is_due(now, interval) {
            self.take()
        } else {
            None
        }
    }

    /// Take the pending write regardless of timing (blur / navigation)
    pub fn take(&mut self) -> Option<(String, FieldValue)> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some((self.key.clone(), self.kind.parse_input(&self.buffer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn staged(now: Instant) -> StagedInput {
        StagedInput::begin("city", FieldKind::Text, "Bre".to_string(), now)
    }

    #[test]
    fn test_begin_is_clean() {
        let now = Instant::now();
        let mut input = staged(now);
        assert_eq!(input.value(), "Bre");
        assert!(!input.is_dirty());
        assert!(input.take().is_none());
    }

    #[test]
    fn test_not_due_before_interval() {
        let start = Instant::now();
        let mut input = staged(start);
        input.push_char('m', start);
        let early = start + Duration::from_millis(100);
        assert!(input.take_if_due(early, DEFAULT_FLUSH_INTERVAL).is_none());
        assert!(input.is_dirty());
    }

    #[test]
    fn test_due_after_idle_interval() {
        let start = Instant::now();
        let mut input = staged(start);
        input.push_char('m', start);
        let later = start + DEFAULT_FLUSH_INTERVAL;
        assert_eq!(
            input.take_if_due(later, DEFAULT_FLUSH_INTERVAL),
            Some(("city".to_string(), FieldValue::text("Brem")))
        );
        assert!(!input.is_dirty());
    }

    #[test]
    fn test_later_keystroke_postpones_flush() {
        let start = Instant::now();
        let mut input = staged(start);
        input.push_char('m', start);
        let second = start + Duration::from_millis(250);
        input.push_char('e', second);

        let check = start + Duration::from_millis(400);
        assert!(input.take_if_due(check, DEFAULT_FLUSH_INTERVAL).is_none());

        let flushed = input
            .take_if_due(second + DEFAULT_FLUSH_INTERVAL, DEFAULT_FLUSH_INTERVAL)
            .unwrap();
        assert_eq!(flushed.1, FieldValue::text("Breme"));
    }

    #[test]
    fn test_take_flushes_immediately() {
        let now = Instant::now();
        let mut input = staged(now);
        input.pop_char(now);
        assert_eq!(
            input.take(),
            Some(("city".to_string(), FieldValue::text("Br")))
        );
        assert!(input.take().is_none());
    }

    #[test]
    fn test_typed_conversion_on_flush() {
        let now = Instant::now();
        let mut input = StagedInput::begin("skills", FieldKind::List, String::new(), now);
        for c in "Excel, SAP".chars() {
            input.push_char(c, now);
        }
        assert_eq!(input.take().unwrap().1, FieldValue::list(["Excel", "SAP"]));
    }

    #[test]
    fn test_pop_on_empty_buffer_stays_clean() {
        let now = Instant::now();
        let mut input = StagedInput::begin("city", FieldKind::Text, String::new(), now);
        input.pop_char(now);
        assert!(!input.is_dirty());
    }
}
