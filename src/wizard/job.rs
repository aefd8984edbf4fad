//! Job posting wizard: five steps from basics to publishing

use serde_json::Value;

use super::cv::BRANCHES;
use super::steps::{visible_payload, Condition, FieldKind, FieldSpec, StepSpec};
use super::validation::{ValidationErrors, Validator};
use super::{StepRange, StepWizard, WizardCore, WizardKind};
use crate::state::FormData;

pub const EMPLOYMENT_TYPES: &[&str] = &["vollzeit", "teilzeit", "ausbildung", "minijob", "praktikum"];
pub const EXPERIENCE_LEVELS: &[&str] = &["einsteiger", "erfahren", "experte"];

pub const JOBS_TABLE: &str = "jobs";
pub const JOB_RANGE: StepRange = StepRange::new(1, 5);

const MIN_DESCRIPTION_CHARS: usize = 50;
const MAX_SALARY: i64 = 500_000;
const MAX_PART_TIME_HOURS: i64 = 40;

const BASICS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Job title", FieldKind::Text).required(),
    FieldSpec::new("company_name", "Company", FieldKind::Text).required(),
    FieldSpec::new("location", "Location", FieldKind::Text).required(),
    FieldSpec::new("employment_type", "Employment type", FieldKind::Choice(EMPLOYMENT_TYPES))
        .required(),
    FieldSpec::new("branche", "Branch", FieldKind::Choice(BRANCHES)).required(),
];

const REQUIREMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("required_skills", "Required skills", FieldKind::List).required(),
    FieldSpec::new("experience_level", "Experience level", FieldKind::Choice(EXPERIENCE_LEVELS))
        .required(),
    FieldSpec::new("nice_to_have", "Nice to have", FieldKind::List),
];

const DESCRIPTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("description", "Description", FieldKind::Multiline).required(),
    FieldSpec::new("tasks", "Tasks", FieldKind::Multiline),
];

const LOGISTICS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("salary_min", "Salary from (EUR/year)", FieldKind::Number).required(),
    FieldSpec::new("salary_max", "Salary to (EUR/year)", FieldKind::Number).required(),
    FieldSpec::new("weekly_hours", "Hours per week", FieldKind::Number)
        .required()
        .when(Condition::Equals("employment_type", "teilzeit")),
    FieldSpec::new("start_date", "Start date (YYYY-MM-DD)", FieldKind::Date),
    FieldSpec::new("contact_email", "Contact e-mail", FieldKind::Email).required(),
    FieldSpec::new("remote", "Remote work possible", FieldKind::Flag),
];

pub static JOB_STEPS: [StepSpec; 5] = [
    StepSpec {
        number: 1,
        title: "Basics",
        fields: BASICS_FIELDS,
    },
    StepSpec {
        number: 2,
        title: "Skills & requirements",
        fields: REQUIREMENT_FIELDS,
    },
    StepSpec {
        number: 3,
        title: "Description",
        fields: DESCRIPTION_FIELDS,
    },
    StepSpec {
        number: 4,
        title: "Compensation & logistics",
        fields: LOGISTICS_FIELDS,
    },
    StepSpec {
        number: 5,
        title: "Preview & publish",
        fields: &[],
    },
];

pub fn validate_job_step(data: &FormData, step: u8) -> ValidationErrors {
    let mut v = Validator::new(data);
    match step {
        1 => {
            v.required("title", "Job title")
                .required("company_name", "Company")
                .required("location", "Location")
                .choice("employment_type", "employment type", EMPLOYMENT_TYPES)
                .choice("branche", "branch", BRANCHES);
        }
        2 => {
            v.non_empty_list("required_skills", "Add at least one required skill")
                .choice("experience_level", "experience level", EXPERIENCE_LEVELS);
        }
        3 => {
            v.min_chars("description", "Description", MIN_DESCRIPTION_CHARS);
        }
        4 => {
            v.number_in("salary_min", "Minimum salary", 1..=MAX_SALARY)
                .number_in("salary_max", "Maximum salary", 1..=MAX_SALARY);
            if !v.has_error("salary_min") && !v.has_error("salary_max") {
                if let (Some(min), Some(max)) = (data.number("salary_min"), data.number("salary_max")) {
                    if min > max {
                        v.error("salary_max", "Maximum salary must not be below the minimum");
                    }
                }
            }
            v.when(data.text("employment_type") == "teilzeit", |v| {
                v.number_in("weekly_hours", "Hours per week", 1..=MAX_PART_TIME_HOURS);
            })
            .optional_date("start_date", "Start date")
            .email("contact_email", "Contact e-mail");
        }
        _ => {}
    }
    v.finish()
}

#[derive(Debug, Clone)]
pub struct JobWizard {
    core: WizardCore,
}

impl Default for JobWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl JobWizard {
    pub fn new() -> Self {
        Self {
            core: WizardCore::new(JOB_RANGE, FormData::new()),
        }
    }

    /// Row inserted into the jobs table
    pub fn posting_payload(&self, company_id: Option<&str>) -> Value {
        let mut payload = visible_payload(&JOB_STEPS, &self.core.data).to_json();
        if let (Some(id), Value::Object(map)) = (company_id, &mut payload) {
            map.insert("company_id".to_string(), Value::String(id.to_string()));
        }
        payload
    }
}

impl StepWizard for JobWizard {
    fn core(&self) -> &WizardCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WizardCore {
        &mut self.core
    }

    fn kind(&self) -> WizardKind {
        WizardKind::Job
    }

    fn title(&self) -> &'static str {
        "Post a job"
    }

    fn steps(&self) -> &'static [StepSpec] {
        &JOB_STEPS
    }

    fn validate_step(&self, step: u8) -> ValidationErrors {
        validate_job_step(&self.core.data, step)
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use crate::state::{FieldValue, FormData};

    /// Valid step 1 data
    pub fn basics() -> FormData {
        FormData::from_iter([
            ("title", FieldValue::text("Koch/Köchin")),
            ("company_name", FieldValue::text("Gasthaus Weserblick")),
            ("location", FieldValue::text("Bremen")),
            ("employment_type", FieldValue::text("vollzeit")),
            ("branche", FieldValue::text("gastronomie")),
        ])
    }

    /// Data that passes every job step
    pub fn complete_posting() -> FormData {
        let mut data = basics();
        data.merge(FormData::from_iter([
            ("required_skills", FieldValue::list(["Kochen", "HACCP"])),
            ("experience_level", FieldValue::text("erfahren")),
            (
                "description",
                FieldValue::text(
                    "Wir suchen Verstärkung für unsere Küche mit regionaler Karte und festen Zeiten.",
                ),
            ),
            ("salary_min", FieldValue::Number(32_000)),
            ("salary_max", FieldValue::Number(38_000)),
            ("contact_email", FieldValue::text("jobs@weserblick.de")),
        ]));
        data
    }
}

#[cfg(test)]
mod tests {
    use super::tests_support::{basics, complete_posting};
    use super::*;
    use crate::state::FieldValue;
    use crate::wizard::StepOutcome;

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_basics_required() {
            let errors = validate_job_step(&FormData::new(), 1);
            assert_eq!(
                errors.fields(),
                vec!["branche", "company_name", "employment_type", "location", "title"]
            );
            assert!(validate_job_step(&basics(), 1).is_empty());
        }

        #[test]
        fn test_description_minimum_length() {
            let data = FormData::from_iter([("description", FieldValue::text("Kurz und knapp"))]);
            assert!(validate_job_step(&data, 3).contains("description"));
        }

        #[test]
        fn test_salary_order() {
            let mut data = complete_posting();
            data.set("salary_min", FieldValue::Number(50_000));
            let errors = validate_job_step(&data, 4);
            assert_eq!(
                errors.get("salary_max"),
                Some("Maximum salary must not be below the minimum")
            );
        }

        #[test]
        fn test_salary_out_of_range() {
            let mut data = complete_posting();
            data.set("salary_max", FieldValue::Number(900_000));
            let errors = validate_job_step(&data, 4);
            assert_eq!(
                errors.get("salary_max"),
                Some("Maximum salary must be between 1 and 500000")
            );
        }

        #[test]
        fn test_part_time_requires_hours() {
            let mut data = complete_posting();
            data.set("employment_type", FieldValue::text("teilzeit"));
            assert!(validate_job_step(&data, 4).contains("weekly_hours"));

            data.set("weekly_hours", FieldValue::Number(20));
            assert!(validate_job_step(&data, 4).is_empty());
        }

        #[test]
        fn test_start_date_format() {
            let mut data = complete_posting();
            data.set("start_date", FieldValue::text("1.4.2026"));
            assert!(validate_job_step(&data, 4).contains("start_date"));
        }

        #[test]
        fn test_complete_posting_passes() {
            let data = complete_posting();
            for step in 1..=5 {
                assert!(validate_job_step(&data, step).is_empty(), "step {step}");
            }
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_walk_to_preview() {
            let mut wizard = JobWizard::new();
            wizard.update(complete_posting());
            for expected in 2..=5 {
                assert_eq!(wizard.go_next(), StepOutcome::Moved(expected));
            }
            assert_eq!(wizard.go_next(), StepOutcome::Unchanged);
            assert_eq!(wizard.progress(), 80.0);
            assert!(wizard.current_spec().is_preview());
        }

        #[test]
        fn test_jump_blocked_by_intervening_step() {
            let mut wizard = JobWizard::new();
            wizard.update(basics());
            match wizard.go_to_step(4) {
                StepOutcome::Blocked { step, errors } => {
                    assert_eq!(step, 2);
                    assert!(errors.contains("required_skills"));
                }
                other => panic!("expected blocked, got {other:?}"),
            }
            assert_eq!(wizard.current_step(), 1);
            // errors belong to another step
            assert!(wizard.errors().is_empty());
        }

        #[test]
        fn test_data_kept_when_going_back() {
            let mut wizard = JobWizard::new();
            wizard.update(complete_posting());
            wizard.go_to_step(3);
            wizard.go_previous();
            wizard.go_previous();
            assert_eq!(wizard.data(), &complete_posting());
        }
    }

    mod payload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_posting_payload_with_company() {
            let mut wizard = JobWizard::new();
            wizard.update(complete_posting());
            let payload = wizard.posting_payload(Some("c-42"));
            assert_eq!(payload["company_id"], "c-42");
            assert_eq!(payload["salary_min"], 32_000);
            assert_eq!(payload["required_skills"][0], "Kochen");
            assert!(payload.get("weekly_hours").is_none());
        }

        #[test]
        fn test_posting_payload_without_company() {
            let mut wizard = JobWizard::new();
            wizard.update(basics());
            assert!(wizard.posting_payload(None).get("company_id").is_none());
        }
    }
}
