//! Text field value objects used by the record-entry sub-form

/// Input restriction for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    /// Digits only, at most four (a year)
    Year,
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub kind: InputKind,
    pub is_required: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            kind: InputKind::Text,
            is_required,
        }
    }

    /// Create a new year field
    pub fn year(name: &str, label: &str, is_required: bool) -> Self {
        Self {
            kind: InputKind::Year,
            ..Self::text(name, label, is_required)
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match self.kind {
            InputKind::Text => self.value.push(c),
            InputKind::Year => {
                if c.is_ascii_digit() && self.value.len() < 4 {
                    self.value.push(c);
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Label shown in the field border
    pub fn display_label(&self) -> String {
        if self.is_required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Whether a required field is still blank
    pub fn is_missing(&self) -> bool {
        self.is_required && self.value.trim().is_empty()
    }
}
