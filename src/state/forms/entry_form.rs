//! Sub-form for adding one entry to a record-list field

use super::field::FormField;
use super::form_data::Record;
use crate::wizard::steps::RecordField;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Entry form bound to one record-list field of the wizard
#[derive(Debug, Clone)]
pub struct EntryForm {
    /// Record-list field the entry is appended to
    pub target: String,
    pub title: String,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl EntryForm {
    /// Build the form from a record schema. The schema must not be empty.
    pub fn from_schema(target: &str, title: &str, schema: &[RecordField]) -> Self {
        let fields = schema
            .iter()
            .map(|f| {
                if f.is_year {
                    FormField::year(f.key, f.label, f.required)
                } else {
                    FormField::text(f.key, f.label, f.required)
                }
            })
            .collect();
        Self {
            target: target.to_string(),
            title: title.to_string(),
            fields,
            active_field_index: 0,
        }
    }

    /// Labels of required fields that are still blank
    pub fn missing_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_missing())
            .map(|f| f.label.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Collect the entered values as a record (blank optional fields included)
    pub fn to_record(&self) -> Record {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.as_text().trim().to_string()))
            .collect()
    }
}

impl Form for EntryForm {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.active_field_index]
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::steps::{EDUCATION_FIELDS, EXPERIENCE_FIELDS};

    fn education_form() -> EntryForm {
        EntryForm::from_schema("education", "Add education", &EDUCATION_FIELDS)
    }

    #[test]
    fn test_from_schema_builds_fields_in_order() {
        let form = education_form();
        assert_eq!(form.target, "education");
        assert_eq!(form.field_count(), EDUCATION_FIELDS.len());
        assert_eq!(form.get_field(0).unwrap().name, "institution");
        assert_eq!(form.get_field(1).unwrap().name, "degree");
        assert!(form.get_field(EDUCATION_FIELDS.len()).is_none());
    }

    #[test]
    fn test_next_field_cycles() {
        let mut form = education_form();
        for _ in 0..form.field_count() {
            form.next_field();
        }
        assert_eq!(form.active_field_index, 0);
    }

    #[test]
    fn test_prev_field_wraps_to_last() {
        let mut form = education_form();
        form.prev_field();
        assert_eq!(form.active_field_index, form.field_count() - 1);
    }

    #[test]
    fn test_set_active_field_clamps() {
        let mut form = education_form();
        form.set_active_field(100);
        assert_eq!(form.active_field_index, form.field_count() - 1);
    }

    #[test]
    fn test_typing_goes_to_active_field() {
        let mut form = EntryForm::from_schema("experience", "Add experience", &EXPERIENCE_FIELDS);
        for c in "Bäckerei Lutz".chars() {
            form.get_active_field_mut().push_char(c);
        }
        form.next_field();
        for c in "Verkäuferin".chars() {
            form.get_active_field_mut().push_char(c);
        }

        assert!(form.is_complete());
        let record = form.to_record();
        assert_eq!(record.get("company").unwrap(), "Bäckerei Lutz");
        assert_eq!(record.get("role").unwrap(), "Verkäuferin");
        assert_eq!(record.get("start_year").unwrap(), "");
    }

    #[test]
    fn test_missing_fields_lists_required_labels() {
        let form = education_form();
        assert_eq!(form.missing_fields(), vec!["Institution", "Degree"]);
        assert!(!form.is_complete());
    }
}
