//! Remote suggestions for the current step
//!
//! A suggestion calls a named backend function with the wizard data as
//! context. The answer is turned into a partial update and merged exactly
//! like user input, so it never overwrites what the user already typed.

use serde::Deserialize;
use serde_json::{json, Value};

use super::WizardKind;
use crate::state::{FieldValue, FormData};

pub const SUGGEST_SKILLS: &str = "suggest-skills";
pub const GENERATE_MOTIVATION: &str = "generate-motivation";
pub const GENERATE_JOB_DESCRIPTION: &str = "generate-job-description";
pub const SUGGEST_SALARY: &str = "suggest-salary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// Suggested entries are added to the list, keeping existing ones first
    Skills { target: &'static str },
    /// Generated text, used only while the field is empty
    Text {
        function: &'static str,
        target: &'static str,
    },
    /// Salary range, used only while neither bound is set
    Salary,
}

/// Response envelope of the AI functions
#[derive(Debug, Deserialize)]
struct Generated<T> {
    content: T,
}

#[derive(Debug, Deserialize)]
struct SalaryRange {
    min: i64,
    max: i64,
}

/// Suggestions offered on a step, in the order they are requested
pub fn suggestions_for(kind: WizardKind, step: u8) -> &'static [Suggestion] {
    match (kind, step) {
        (WizardKind::Cv, 3) => &[
            Suggestion::Skills { target: "skills" },
            Suggestion::Text {
                function: GENERATE_MOTIVATION,
                target: "motivation",
            },
        ],
        (WizardKind::Job, 2) => &[Suggestion::Skills {
            target: "required_skills",
        }],
        (WizardKind::Job, 3) => &[Suggestion::Text {
            function: GENERATE_JOB_DESCRIPTION,
            target: "description",
        }],
        (WizardKind::Job, 4) => &[Suggestion::Salary],
        _ => &[],
    }
}

impl Suggestion {
    pub fn function(&self) -> &'static str {
        match self {
            Suggestion::Skills { .. } => SUGGEST_SKILLS,
            Suggestion::Text { function, .. } => *function,
            Suggestion::Salary => SUGGEST_SALARY,
        }
    }

    /// Whether calling the function could change anything
    pub fn is_applicable(&self, data: &FormData) -> bool {
        match self {
            Suggestion::Skills { .. } => true,
            Suggestion::Text { target, .. } => !data.is_set(target),
            Suggestion::Salary => !data.is_set("salary_min") && !data.is_set("salary_max"),
        }
    }

    pub fn request(&self, kind: WizardKind, data: &FormData) -> Value {
        let wizard = match kind {
            WizardKind::Cv => "cv",
            WizardKind::Job => "job",
        };
        json!({
            "wizard": wizard,
            "context": data.to_json(),
        })
    }

    /// Turn a function response into a partial update
    pub fn to_update(&self, data: &FormData, response: Value) -> Result<FormData, serde_json::Error> {
        let mut update = FormData::new();
        match self {
            Suggestion::Skills { target } => {
                let suggested: Generated<Vec<String>> = serde_json::from_value(response)?;
                let mut merged = data.list(target).to_vec();
                for skill in suggested.content {
                    let skill = skill.trim();
                    let known = merged.iter().any(|s| s.eq_ignore_ascii_case(skill));
                    if !skill.is_empty() && !known {
                        merged.push(skill.to_string());
                    }
                }
                update.set(*target, FieldValue::List(merged));
            }
            Suggestion::Text { target, .. } => {
                let generated: Generated<String> = serde_json::from_value(response)?;
                if !data.is_set(target) && !generated.content.trim().is_empty() {
                    update.set(*target, FieldValue::text(generated.content.trim()));
                }
            }
            Suggestion::Salary => {
                let range: Generated<SalaryRange> = serde_json::from_value(response)?;
                if self.is_applicable(data) {
                    let SalaryRange { min, max } = range.content;
                    update.set("salary_min", FieldValue::Number(min.min(max)));
                    update.set("salary_max", FieldValue::Number(min.max(max)));
                }
            }
        }
        Ok(update)
    }
}
