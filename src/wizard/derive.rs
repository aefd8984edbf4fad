//! Derived record entries synthesized from status-specific fields

use crate::state::{record, FieldValue, FormData, Record};
use crate::wizard::ValidationErrors;

/// Degree recorded for a school entry derived from the pupil details
pub const SCHOOL_DEGREE: &str = "Schulabschluss";

/// A record to add to a record-list field, replacing the entry derived
/// earlier from the same source fields when there is one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation {
    pub field: &'static str,
    pub record: Record,
    pub replaces: Option<Record>,
}

/// Key remembering the last entry derived into `field`.
/// Not part of any step, so it never reaches a payload.
pub fn marker_key(field: &str) -> String {
    format!("derived_{field}")
}

/// Compute the entries implied by the current data.
///
/// - an apprentice with employer, role and start year gets a matching
///   `experience` entry
/// - a pupil with school and graduation year gets a matching `education` entry
///
/// Source fields with a validation error in `source_errors` derive nothing,
/// so half-typed values never produce an entry. Applying the result and
/// calling this again yields nothing.
pub fn derive_augmentations(data: &FormData, source_errors: &ValidationErrors) -> Vec<Augmentation> {
    let valid = |keys: &[&str]| keys.iter().all(|k| !source_errors.contains(k));
    let mut augmentations = Vec::new();

    match data.text("status") {
        "azubi" if valid(&["employer", "apprenticeship_role", "start_year"]) => {
            let employer = data.text("employer").trim();
            let role = data.text("apprenticeship_role").trim();
            if let Some(start) = data.number("start_year") {
                let start = start.to_string();
                let derived = record([
                    ("company", employer),
                    ("role", role),
                    ("start_year", start.as_str()),
                    ("end_year", ""),
                ]);
                augmentations.extend(augment(data, "experience", derived, |r| {
                    field_eq(r, "company", employer) && field_eq(r, "role", role)
                }));
            }
        }
        "schueler" if valid(&["school", "graduation_year"]) => {
            let school = data.text("school").trim();
            if let Some(year) = data.number("graduation_year") {
                let year = year.to_string();
                let derived = record([
                    ("institution", school),
                    ("degree", SCHOOL_DEGREE),
                    ("start_year", ""),
                    ("end_year", year.as_str()),
                ]);
                augmentations.extend(augment(data, "education", derived, |r| {
                    field_eq(r, "institution", school) && field_eq(r, "end_year", &year)
                }));
            }
        }
        _ => {}
    }

    augmentations
}

/// Decide how `derived` lands in `field`: nothing when it is already there,
/// a replacement of the previously derived entry, or an append unless the
/// user entered an equivalent record themselves.
fn augment(
    data: &FormData,
    field: &'static str,
    derived: Record,
    equivalent: impl Fn(&Record) -> bool,
) -> Option<Augmentation> {
    let records = data.records(field);
    let previous = data
        .records(&marker_key(field))
        .first()
        .filter(|p| records.contains(p));

    match previous {
        Some(p) if *p == derived => None,
        Some(p) => Some(Augmentation {
            field,
            record: derived,
            replaces: Some(p.clone()),
        }),
        None if records.iter().any(|r| equivalent(r)) => None,
        None => Some(Augmentation {
            field,
            record: derived,
            replaces: None,
        }),
    }
}

/// Write the derived entries into `data`. Returns whether anything changed.
pub fn apply_augmentations(data: &mut FormData, source_errors: &ValidationErrors) -> bool {
    let augmentations = derive_augmentations(data, source_errors);
    let changed = !augmentations.is_empty();
    for Augmentation {
        field,
        record,
        replaces,
    } in augmentations
    {
        let mut records = data.records(field).to_vec();
        match replaces.and_then(|old| records.iter().position(|r| *r == old)) {
            Some(index) => {
                tracing::debug!(field, index, "replacing derived entry");
                records[index] = record.clone();
            }
            None => {
                tracing::debug!(field, "adding derived entry");
                records.push(record.clone());
            }
        }
        data.set(field, FieldValue::Records(records));
        data.set(marker_key(field), FieldValue::Records(vec![record]));
    }
    changed
}

fn field_eq(record: &Record, key: &str, expected: &str) -> bool {
    record
        .get(key)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}
