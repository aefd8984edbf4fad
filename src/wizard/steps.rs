//! Step and field descriptors shared by rendering and input handling

use crate::state::{FieldValue, FormData};

/// One sub-field of a record-list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordField {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub is_year: bool,
}

pub const EDUCATION_FIELDS: [RecordField; 4] = [
    RecordField {
        key: "institution",
        label: "Institution",
        required: true,
        is_year: false,
    },
    RecordField {
        key: "degree",
        label: "Degree",
        required: true,
        is_year: false,
    },
    RecordField {
        key: "start_year",
        label: "Start year",
        required: false,
        is_year: true,
    },
    RecordField {
        key: "end_year",
        label: "End year",
        required: false,
        is_year: true,
    },
];

pub const EXPERIENCE_FIELDS: [RecordField; 4] = [
    RecordField {
        key: "company",
        label: "Company",
        required: true,
        is_year: false,
    },
    RecordField {
        key: "role",
        label: "Role",
        required: true,
        is_year: false,
    },
    RecordField {
        key: "start_year",
        label: "Start year",
        required: false,
        is_year: true,
    },
    RecordField {
        key: "end_year",
        label: "End year",
        required: false,
        is_year: true,
    },
];

/// How a field is edited and how staged text is converted on flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Email,
    Phone,
    Year,
    Number,
    /// `YYYY-MM-DD`
    Date,
    Flag,
    Choice(&'static [&'static str]),
    /// Comma separated while editing
    List,
    Records(&'static [RecordField]),
}

impl FieldKind {
    /// Whether the field is edited by typing
    pub fn is_text_input(&self) -> bool {
        !matches!(
            self,
            FieldKind::Flag | FieldKind::Choice(_) | FieldKind::Records(_)
        )
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::Multiline)
    }

    /// Convert a raw text buffer into the value stored in the form data
    pub fn parse_input(&self, raw: &str) -> FieldValue {
        match self {
            FieldKind::Year | FieldKind::Number => match raw.trim().parse::<i64>() {
                Ok(n) => FieldValue::Number(n),
                Err(_) => FieldValue::text(raw),
            },
            FieldKind::List => FieldValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => FieldValue::text(raw),
        }
    }

    /// Text buffer to start editing from
    pub fn edit_buffer(&self, value: Option<&FieldValue>) -> String {
        match value {
            Some(FieldValue::Text(s)) => s.clone(),
            Some(FieldValue::Number(n)) => n.to_string(),
            Some(FieldValue::List(items)) => items.join(", "),
            _ => String::new(),
        }
    }
}

/// Visibility condition for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Equals(&'static str, &'static str),
    FlagSet(&'static str),
}

impl Condition {
    pub fn holds(&self, data: &FormData) -> bool {
        match self {
            Condition::Always => true,
            Condition::Equals(key, value) => data.text(key) == *value,
            Condition::FlagSet(key) => data.flag(key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub visible: Condition,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            visible: Condition::Always,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn when(mut self, condition: Condition) -> Self {
        self.visible = condition;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub number: u8,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

impl StepSpec {
    /// A step without input fields renders the preview of all data
    pub fn is_preview(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn visible_fields(&self, data: &FormData) -> Vec<&'static FieldSpec> {
        self.fields
            .iter()
            .filter(|f| f.visible.holds(data))
            .collect()
    }
}

/// Backend payload: every currently visible field of the catalogue that has
/// a value. Fields hidden by a condition are left out.
pub fn visible_payload(steps: &[StepSpec], data: &FormData) -> FormData {
    let keys: Vec<&str> = steps
        .iter()
        .flat_map(|step| step.visible_fields(data))
        .map(|field| field.key)
        .collect();
    data.pick(&keys)
}

/// Cycle a choice value forwards or backwards. An unset value starts at the
/// first (forwards) or last (backwards) option.
pub fn cycle_choice(options: &[&'static str], current: &str, forward: bool) -> &'static str {
    if options.is_empty() {
        return "";
    }
    let position = options.iter().position(|o| *o == current);
    let index = match (position, forward) {
        (None, true) => 0,
        (None, false) => options.len() - 1,
        (Some(i), true) => (i + 1) % options.len(),
        (Some(0), false) => options.len() - 1,
        (Some(i), false) => i - 1,
    };
    options[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OPTIONS: &[&str] = &["a", "b", "c"];

    #[test]
    fn test_parse_year_input() {
        assert_eq!(FieldKind::Year.parse_input(" 2026"), FieldValue::Number(2026));
        assert_eq!(FieldKind::Year.parse_input("20x6"), FieldValue::text("20x6"));
    }

    #[test]
    fn test_parse_list_input() {
        assert_eq!(
            FieldKind::List.parse_input("Excel, , SAP ,"),
            FieldValue::list(["Excel", "SAP"])
        );
    }

    #[test]
    fn test_edit_buffer_from_values() {
        assert_eq!(
            FieldKind::List.edit_buffer(Some(&FieldValue::list(["a", "b"]))),
            "a, b"
        );
        assert_eq!(FieldKind::Year.edit_buffer(Some(&FieldValue::Number(2025))), "2025");
        assert_eq!(FieldKind::Text.edit_buffer(None), "");
    }

    #[test]
    fn test_text_input_kinds() {
        assert!(FieldKind::Email.is_text_input());
        assert!(FieldKind::List.is_text_input());
        assert!(!FieldKind::Flag.is_text_input());
        assert!(!FieldKind::Choice(OPTIONS).is_text_input());
        assert!(!FieldKind::Records(&EDUCATION_FIELDS).is_text_input());
    }

    #[test]
    fn test_condition_holds() {
        let data = FormData::from_iter([
            ("status", FieldValue::text("azubi")),
            ("has_license", FieldValue::Flag(true)),
        ]);
        assert!(Condition::Always.holds(&data));
        assert!(Condition::Equals("status", "azubi").holds(&data));
        assert!(!Condition::Equals("status", "schueler").holds(&data));
        assert!(Condition::FlagSet("has_license").holds(&data));
        assert!(!Condition::FlagSet("remote").holds(&data));
    }

    #[test]
    fn test_visible_fields_follow_conditions() {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("has_license", "License", FieldKind::Flag),
            FieldSpec::new("license_class", "Class", FieldKind::Text)
                .required()
                .when(Condition::FlagSet("has_license")),
        ];
        let step = StepSpec {
            number: 2,
            title: "Personal data",
            fields: FIELDS,
        };

        let mut data = FormData::new();
        assert_eq!(step.visible_fields(&data).len(), 1);
        data.set("has_license", FieldValue::Flag(true));
        assert_eq!(step.visible_fields(&data).len(), 2);
        assert!(step.visible_fields(&data)[1].required);
    }

    #[test]
    fn test_visible_payload_skips_hidden_fields() {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("has_license", "License", FieldKind::Flag),
            FieldSpec::new("license_class", "Class", FieldKind::Text)
                .when(Condition::FlagSet("has_license")),
        ];
        let steps = [StepSpec {
            number: 1,
            title: "Personal data",
            fields: FIELDS,
        }];
        let data = FormData::from_iter([
            ("has_license", FieldValue::Flag(false)),
            ("license_class", FieldValue::text("B")),
            ("scratch", FieldValue::text("x")),
        ]);
        let payload = visible_payload(&steps, &data);
        assert_eq!(payload.len(), 1);
        assert!(payload.get("license_class").is_none());
    }

    #[test]
    fn test_cycle_choice() {
        assert_eq!(cycle_choice(OPTIONS, "", true), "a");
        assert_eq!(cycle_choice(OPTIONS, "", false), "c");
        assert_eq!(cycle_choice(OPTIONS, "c", true), "a");
        assert_eq!(cycle_choice(OPTIONS, "a", false), "c");
        assert_eq!(cycle_choice(OPTIONS, "b", true), "c");
        assert_eq!(cycle_choice(&[], "b", true), "");
    }
}
