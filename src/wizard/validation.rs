//! Field-level validation rules
//!
//! Validation never fails with an error value: problems are collected as a
//! message per field and returned as data.

use crate::state::FormData;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use super::steps::RecordField;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()/\-]+$").expect("phone pattern is valid"));

/// Minimum number of digits in a phone number
const MIN_PHONE_DIGITS: usize = 6;

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    PHONE_PATTERN.is_match(value)
        && value.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

/// Error message per field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. The first message for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[cfg(test)]
    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

/// Builder collecting errors for one step
pub struct Validator<'a> {
    data: &'a FormData,
    errors: ValidationErrors,
}

impl<'a> Validator<'a> {
    pub fn new(data: &'a FormData) -> Self {
        Self {
            data,
            errors: ValidationErrors::new(),
        }
    }

    /// Non-empty after trim
    pub fn required(&mut self, key: &str, label: &str) -> &mut Self {
        if !self.data.is_set(key) {
            self.errors.insert(key, format!("{label} is required"));
        }
        self
    }

    /// Required value that must be one of the given options
    pub fn choice(&mut self, key: &str, label: &str, options: &[&str]) -> &mut Self {
        let value = self.data.text(key);
        if value.trim().is_empty() {
            self.errors.insert(key, format!("Please choose a {label}"));
        } else if !options.contains(&value) {
            self.errors.insert(key, format!("Unknown {label} \"{value}\""));
        }
        self
    }

    /// Required text with at least `min` characters
    pub fn min_chars(&mut self, key: &str, label: &str, min: usize) -> &mut Self {
        let count = self.data.text(key).trim().chars().count();
        if count == 0 {
            self.errors.insert(key, format!("{label} is required"));
        } else if count < min {
            self.errors.insert(
                key,
                format!("{label} needs at least {min} characters ({count} so far)"),
            );
        }
        self
    }

    /// Required e-mail address
    pub fn email(&mut self, key: &str, label: &str) -> &mut Self {
        let value = self.data.text(key);
        if value.trim().is_empty() {
            self.errors.insert(key, format!("{label} is required"));
        } else if !is_valid_email(value) {
            self.errors.insert(key, "Enter a valid e-mail address");
        }
        self
    }

    /// Required phone number
    pub fn phone(&mut self, key: &str, label: &str) -> &mut Self {
        let value = self.data.text(key);
        if value.trim().is_empty() {
            self.errors.insert(key, format!("{label} is required"));
        } else if !is_valid_phone(value) {
            self.errors.insert(key, "Enter a valid phone number");
        }
        self
    }

    /// Required year within a plausible window
    pub fn year_in(&mut self, key: &str, label: &str, range: RangeInclusive<i64>) -> &mut Self {
        self.number_in(key, label, range)
    }

    /// Required number within a range
    pub fn number_in(&mut self, key: &str, label: &str, range: RangeInclusive<i64>) -> &mut Self {
        if !self.data.is_set(key) {
            self.errors.insert(key, format!("{label} is required"));
            return self;
        }
        match self.data.number(key) {
            Some(n) if range.contains(&n) => {}
            Some(_) => {
                self.errors.insert(
                    key,
                    format!(
                        "{label} must be between {} and {}",
                        range.start(),
                        range.end()
                    ),
                );
            }
            None => {
                self.errors.insert(key, format!("{label} must be a number"));
            }
        }
        self
    }

    /// Optional `YYYY-MM-DD` date; checked only when present
    pub fn optional_date(&mut self, key: &str, label: &str) -> &mut Self {
        let value = self.data.text(key).trim();
        if !value.is_empty() && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            self.errors
                .insert(key, format!("{label} must be a date like 2026-03-01"));
        }
        self
    }

    /// Flag that must be checked
    pub fn checked(&mut self, key: &str, message: &str) -> &mut Self {
        if !self.data.flag(key) {
            self.errors.insert(key, message);
        }
        self
    }

    /// At least one list entry
    pub fn non_empty_list(&mut self, key: &str, message: &str) -> &mut Self {
        if !self.data.is_set(key) {
            self.errors.insert(key, message);
        }
        self
    }

    /// Record list: optionally at least one entry, each entry with its
    /// required sub-fields filled and its years inside `years`
    pub fn records(
        &mut self,
        key: &str,
        label: &str,
        schema: &[RecordField],
        at_least_one: bool,
        years: RangeInclusive<i64>,
    ) -> &mut Self {
        let records = self.data.records(key);
        if at_least_one && records.is_empty() {
            self.errors
                .insert(key, format!("Add at least one {label} entry"));
            return self;
        }
        for (index, record) in records.iter().enumerate() {
            for field in schema {
                let value = record.get(field.key).map(|v| v.trim()).unwrap_or("");
                if field.required && value.is_empty() {
                    self.errors.insert(
                        key,
                        format!("{label} entry {}: {} is required", index + 1, field.label),
                    );
                } else if field.is_year && !value.is_empty() {
                    match value.parse::<i64>() {
                        Ok(year) if years.contains(&year) => {}
                        _ => self.errors.insert(
                            key,
                            format!(
                                "{label} entry {}: {} must be between {} and {}",
                                index + 1,
                                field.label,
                                years.start(),
                                years.end()
                            ),
                        ),
                    }
                }
            }
            let start = record.get("start_year").and_then(|v| v.trim().parse::<i64>().ok());
            let end = record.get("end_year").and_then(|v| v.trim().parse::<i64>().ok());
            if let (Some(start), Some(end)) = (start, end) {
                if end < start {
                    self.errors.insert(
                        key,
                        format!("{label} entry {}: end year is before start year", index + 1),
                    );
                }
            }
        }
        self
    }

    /// Apply rules only when a condition holds (conditional requirements)
    pub fn when(&mut self, condition: bool, rules: impl FnOnce(&mut Self)) -> &mut Self {
        if condition {
            rules(self);
        }
        self
    }

    /// Add a custom error
    pub fn error(&mut self, key: &str, message: impl Into<String>) -> &mut Self {
        self.errors.insert(key, message);
        self
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors.contains(key)
    }

    pub fn finish(&mut self) -> ValidationErrors {
        std::mem::take(&mut self.errors)
    }
}
