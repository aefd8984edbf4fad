//! Form domain layer
//!
//! Shared wizard form data plus the small text-entry sub-form used to add
//! records to record-list fields.

mod entry_form;
mod field;
mod form_data;

pub use entry_form::{EntryForm, Form};
pub use form_data::{record, FieldValue, FormData, Record};
