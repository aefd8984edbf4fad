//! CV wizard: seven steps from branch selection to export

use serde_json::Value;

use super::derive::apply_augmentations;
use super::steps::{
    visible_payload, Condition, FieldKind, FieldSpec, StepSpec, EDUCATION_FIELDS,
    EXPERIENCE_FIELDS,
};
use super::storage::{DraftStore, StorageError};
use super::validation::{ValidationErrors, Validator};
use super::{StepRange, StepWizard, WizardCore, WizardKind};
use crate::state::FormData;

pub const BRANCHES: &[&str] = &[
    "handwerk",
    "it",
    "gesundheit",
    "buero",
    "verkauf",
    "gastronomie",
    "logistik",
];
pub const STATUSES: &[&str] = &["schueler", "azubi", "fachkraft"];
pub const LAYOUTS: &[&str] = &["modern", "classic", "minimal", "creative"];
pub const ACCENT_COLORS: &[&str] = &["blue", "green", "red", "gray"];

/// Draft store key of the unfinished CV
pub const CV_DRAFT_KEY: &str = "cv_wizard";
/// Draft store key of the last exported profile, used by layout edit
pub const CV_PROFILE_KEY: &str = "cv_profile";
pub const PROFILES_TABLE: &str = "profiles";
pub const EXPORT_FUNCTION: &str = "generate-cv-pdf";

pub const FULL_RANGE: StepRange = StepRange::new(1, 7);
pub const LAYOUT_EDIT_RANGE: StepRange = StepRange::new(5, 6);

const MIN_MOTIVATION_CHARS: usize = 30;
const EARLIEST_RECORD_YEAR: i64 = 1950;

const BRANCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("branche", "Branch", FieldKind::Choice(BRANCHES)).required(),
    FieldSpec::new("status", "Status", FieldKind::Choice(STATUSES)).required(),
    FieldSpec::new("school", "School", FieldKind::Text)
        .required()
        .when(Condition::Equals("status", "schueler")),
    FieldSpec::new("graduation_year", "Graduation year", FieldKind::Year)
        .required()
        .when(Condition::Equals("status", "schueler")),
    FieldSpec::new("employer", "Training company", FieldKind::Text)
        .required()
        .when(Condition::Equals("status", "azubi")),
    FieldSpec::new("apprenticeship_role", "Apprenticeship", FieldKind::Text)
        .required()
        .when(Condition::Equals("status", "azubi")),
    FieldSpec::new("start_year", "Start year", FieldKind::Year)
        .required()
        .when(Condition::Equals("status", "azubi")),
];

const PERSONAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("first_name", "First name", FieldKind::Text).required(),
    FieldSpec::new("last_name", "Last name", FieldKind::Text).required(),
    FieldSpec::new("email", "E-mail", FieldKind::Email).required(),
    FieldSpec::new("phone", "Phone", FieldKind::Phone).required(),
    FieldSpec::new("city", "City", FieldKind::Text).required(),
    FieldSpec::new("has_license", "Driving license", FieldKind::Flag),
    FieldSpec::new("license_class", "License class", FieldKind::Text)
        .required()
        .when(Condition::FlagSet("has_license")),
];

const SKILL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("skills", "Skills", FieldKind::List).required(),
    FieldSpec::new("motivation", "Motivation", FieldKind::Multiline).required(),
    FieldSpec::new("interests", "Interests", FieldKind::List),
];

const HISTORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("education", "Education", FieldKind::Records(&EDUCATION_FIELDS)).required(),
    FieldSpec::new("experience", "Experience", FieldKind::Records(&EXPERIENCE_FIELDS)),
];

const LAYOUT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("layout", "Layout", FieldKind::Choice(LAYOUTS)).required(),
    FieldSpec::new("accent_color", "Accent color", FieldKind::Choice(ACCENT_COLORS)),
];

const FINALIZE_FIELDS: &[FieldSpec] = &[FieldSpec::new(
    "privacy_consent",
    "I agree to the privacy policy",
    FieldKind::Flag,
)
.required()];

pub static CV_STEPS: [StepSpec; 7] = [
    StepSpec {
        number: 1,
        title: "Branch & status",
        fields: BRANCH_FIELDS,
    },
    StepSpec {
        number: 2,
        title: "Personal data",
        fields: PERSONAL_FIELDS,
    },
    StepSpec {
        number: 3,
        title: "Skills & motivation",
        fields: SKILL_FIELDS,
    },
    StepSpec {
        number: 4,
        title: "Education & experience",
        fields: HISTORY_FIELDS,
    },
    StepSpec {
        number: 5,
        title: "Layout",
        fields: LAYOUT_FIELDS,
    },
    StepSpec {
        number: 6,
        title: "Preview",
        fields: &[],
    },
    StepSpec {
        number: 7,
        title: "Finalize & export",
        fields: FINALIZE_FIELDS,
    },
];

/// Validate one CV step. `current_year` anchors the plausible year windows.
pub fn validate_cv_step(data: &FormData, step: u8, current_year: i32) -> ValidationErrors {
    let year = i64::from(current_year);
    let mut v = Validator::new(data);
    match step {
        1 => {
            v.choice("branche", "branch", BRANCHES)
                .choice("status", "status", STATUSES)
                .when(data.text("status") == "schueler", |v| {
                    v.required("school", "School")
                        .year_in("graduation_year", "Graduation year", year - 1..=year + 5);
                })
                .when(data.text("status") == "azubi", |v| {
                    v.required("employer", "Training company")
                        .required("apprenticeship_role", "Apprenticeship")
                        .year_in("start_year", "Start year", year - 5..=year + 1);
                });
        }
        2 => {
            v.required("first_name", "First name")
                .required("last_name", "Last name")
                .email("email", "E-mail")
                .phone("phone", "Phone")
                .required("city", "City")
                .when(data.flag("has_license"), |v| {
                    v.required("license_class", "License class");
                });
        }
        3 => {
            v.non_empty_list("skills", "Add at least one skill")
                .min_chars("motivation", "Motivation", MIN_MOTIVATION_CHARS);
        }
        4 => {
            v.records(
                "education",
                "Education",
                &EDUCATION_FIELDS,
                true,
                EARLIEST_RECORD_YEAR..=year + 6,
            )
            .records(
                "experience",
                "Experience",
                &EXPERIENCE_FIELDS,
                data.text("status") == "fachkraft",
                EARLIEST_RECORD_YEAR..=year + 1,
            );
        }
        5 => {
            v.choice("layout", "layout", LAYOUTS);
            if data.is_set("accent_color") {
                v.choice("accent_color", "accent color", ACCENT_COLORS);
            }
        }
        7 => {
            v.checked(
                "privacy_consent",
                "Please accept the privacy policy to export your CV",
            );
        }
        _ => {}
    }
    v.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Full,
    /// Change the layout of an existing profile (steps 5 and 6 only)
    LayoutEdit,
}

impl WizardMode {
    pub fn range(self) -> StepRange {
        match self {
            WizardMode::Full => FULL_RANGE,
            WizardMode::LayoutEdit => LAYOUT_EDIT_RANGE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CvWizard {
    core: WizardCore,
    mode: WizardMode,
    store: Option<DraftStore>,
    current_year: i32,
}

impl CvWizard {
    /// Fresh wizard without persistence
    pub fn new(current_year: i32) -> Self {
        Self {
            core: WizardCore::new(FULL_RANGE, FormData::new()),
            mode: WizardMode::Full,
            store: None,
            current_year,
        }
    }

    /// Wizard backed by the draft store, rehydrated from the last draft.
    /// An unreadable draft is reported through the notice and ignored.
    pub fn with_store(store: DraftStore, current_year: i32) -> Self {
        let mut wizard = Self::new(current_year);
        match store.load(CV_DRAFT_KEY) {
            Ok(Some(draft)) => {
                tracing::info!(
                    saved_at = %draft.saved_at,
                    fields = draft.data.len(),
                    "restored CV draft"
                );
                wizard.core.data = draft.data;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to load CV draft: {}", e);
                wizard.core.notice = Some(format!("Saved draft could not be read: {e}"));
            }
        }
        wizard.store = Some(store);
        wizard
    }

    /// Wizard restricted to the layout steps of an existing profile
    pub fn for_layout_edit(profile: FormData, current_year: i32) -> Self {
        let mut wizard = Self::new(current_year);
        wizard.core.data = profile;
        wizard.set_mode(WizardMode::LayoutEdit);
        wizard
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    /// Switch mode. Entering layout edit starts at its first step; going back
    /// to the full flow keeps the current step.
    pub fn set_mode(&mut self, mode: WizardMode) {
        let range = mode.range();
        let start = match mode {
            WizardMode::LayoutEdit => range.first,
            WizardMode::Full => self.core.controller.current_step(),
        };
        self.mode = mode;
        self.core.controller.set_range(range, start);
        self.core.errors = ValidationErrors::new();
        self.core.active_field = 0;
    }

    /// Forget the persisted draft after a successful export
    pub fn clear_draft(&self) -> Result<(), StorageError> {
        match &self.store {
            Some(store) => store.remove(CV_DRAFT_KEY),
            None => Ok(()),
        }
    }

    /// Row written to the profiles table
    pub fn profile_payload(&self) -> Value {
        visible_payload(&CV_STEPS, &self.core.data).to_json()
    }

    /// Partial row for a layout change
    pub fn layout_patch(&self) -> Value {
        self.core.data.pick(&["layout", "accent_color"]).to_json()
    }
}

impl StepWizard for CvWizard {
    fn core(&self) -> &WizardCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WizardCore {
        &mut self.core
    }

    fn kind(&self) -> WizardKind {
        WizardKind::Cv
    }

    fn title(&self) -> &'static str {
        match self.mode {
            WizardMode::Full => "Create your CV",
            WizardMode::LayoutEdit => "Change CV layout",
        }
    }

    fn steps(&self) -> &'static [StepSpec] {
        &CV_STEPS
    }

    fn validate_step(&self, step: u8) -> ValidationErrors {
        validate_cv_step(&self.core.data, step, self.current_year)
    }

    fn after_merge(&mut self) {
        let source_errors = validate_cv_step(&self.core.data, 1, self.current_year);
        apply_augmentations(&mut self.core.data, &source_errors);
        if self.mode != WizardMode::Full {
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(CV_DRAFT_KEY, &self.core.data) {
                tracing::warn!("Failed to save CV draft: {}", e);
                self.core.notice = Some(format!("Draft not saved: {e}"));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use crate::state::{record, FieldValue, FormData};

    /// Data that passes every CV step for an apprentice in 2026
    pub fn complete_apprentice() -> FormData {
        FormData::from_iter([
            ("branche", FieldValue::text("it")),
            ("status", FieldValue::text("azubi")),
            ("employer", FieldValue::text("Nordlicht Systemhaus")),
            ("apprenticeship_role", FieldValue::text("Fachinformatiker")),
            ("start_year", FieldValue::Number(2025)),
            ("first_name", FieldValue::text("Lena")),
            ("last_name", FieldValue::text("Schulz")),
            ("email", FieldValue::text("lena.schulz@example.de")),
            ("phone", FieldValue::text("+49 421 123456")),
            ("city", FieldValue::text("Bremen")),
            ("skills", FieldValue::list(["Linux", "Netzwerke"])),
            (
                "motivation",
                FieldValue::text("Ich möchte Systeme verstehen und Menschen im Alltag helfen."),
            ),
            (
                "education",
                FieldValue::Records(vec![record([
                    ("institution", "Oberschule Findorff"),
                    ("degree", "Realschulabschluss"),
                    ("end_year", "2024"),
                ])]),
            ),
            ("layout", FieldValue::text("modern")),
            ("privacy_consent", FieldValue::Flag(true)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::tests_support::complete_apprentice;
    use super::*;
    use crate::state::{record, FieldValue};
    use crate::wizard::StepOutcome;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    const YEAR: i32 = 2026;

    fn data(pairs: &[(&str, FieldValue)]) -> FormData {
        pairs.iter().cloned().collect()
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_step_one_requires_branch_and_status() {
            let errors = validate_cv_step(&FormData::new(), 1, YEAR);
            assert_eq!(errors.fields(), vec!["branche", "status"]);
        }

        #[test]
        fn test_step_one_pupil_details() {
            let pupil = data(&[
                ("branche", FieldValue::text("it")),
                ("status", FieldValue::text("schueler")),
                ("school", FieldValue::text("IGS Mitte")),
                ("graduation_year", FieldValue::Number(2035)),
            ]);
            let errors = validate_cv_step(&pupil, 1, YEAR);
            assert_eq!(
                errors.get("graduation_year"),
                Some("Graduation year must be between 2025 and 2031")
            );
            assert!(!errors.contains("employer"));
        }

        #[test]
        fn test_step_one_apprentice_details() {
            let apprentice = data(&[
                ("branche", FieldValue::text("handwerk")),
                ("status", FieldValue::text("azubi")),
            ]);
            let errors = validate_cv_step(&apprentice, 1, YEAR);
            assert_eq!(
                errors.fields(),
                vec!["apprenticeship_role", "employer", "start_year"]
            );
        }

        #[test]
        fn test_step_two_email_and_license() {
            let mut personal = data(&[
                ("first_name", FieldValue::text("Lena")),
                ("last_name", FieldValue::text("Schulz")),
                ("email", FieldValue::text("lena@")),
                ("phone", FieldValue::text("0421 123456")),
                ("city", FieldValue::text("Bremen")),
                ("has_license", FieldValue::Flag(true)),
            ]);
            let errors = validate_cv_step(&personal, 2, YEAR);
            assert_eq!(errors.fields(), vec!["email", "license_class"]);

            personal.set("email", FieldValue::text("lena@example.de"));
            personal.set("has_license", FieldValue::Flag(false));
            assert!(validate_cv_step(&personal, 2, YEAR).is_empty());
        }

        #[test]
        fn test_step_three_motivation_length() {
            let skills = data(&[
                ("skills", FieldValue::list(["Excel"])),
                ("motivation", FieldValue::text("   Zu kurz   ")),
            ]);
            let errors = validate_cv_step(&skills, 3, YEAR);
            assert_eq!(
                errors.get("motivation"),
                Some("Motivation needs at least 30 characters (7 so far)")
            );
        }

        #[test]
        fn test_step_four_experience_required_for_professionals() {
            let mut history = data(&[
                ("status", FieldValue::text("fachkraft")),
                (
                    "education",
                    FieldValue::Records(vec![record([
                        ("institution", "BBS"),
                        ("degree", "Gesellenbrief"),
                    ])]),
                ),
            ]);
            let errors = validate_cv_step(&history, 4, YEAR);
            assert_eq!(errors.fields(), vec!["experience"]);

            history.set("status", FieldValue::text("azubi"));
            assert!(validate_cv_step(&history, 4, YEAR).is_empty());
        }

        #[test]
        fn test_step_five_accent_optional() {
            let layout = data(&[("layout", FieldValue::text("classic"))]);
            assert!(validate_cv_step(&layout, 5, YEAR).is_empty());

            let bad = data(&[
                ("layout", FieldValue::text("classic")),
                ("accent_color", FieldValue::text("pink")),
            ]);
            assert!(validate_cv_step(&bad, 5, YEAR).contains("accent_color"));
        }

        #[test]
        fn test_preview_always_valid() {
            assert!(validate_cv_step(&FormData::new(), 6, YEAR).is_empty());
        }

        #[test]
        fn test_step_seven_requires_consent() {
            let errors = validate_cv_step(&FormData::new(), 7, YEAR);
            assert!(errors.contains("privacy_consent"));
        }

        #[test]
        fn test_complete_data_passes_every_step() {
            let complete = complete_apprentice();
            for step in 1..=7 {
                assert!(
                    validate_cv_step(&complete, step, YEAR).is_empty(),
                    "step {step} failed"
                );
            }
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_full_flow_reaches_last_step() {
            let mut wizard = CvWizard::new(YEAR);
            wizard.update(complete_apprentice());

            for _ in 0..6 {
                assert!(matches!(wizard.go_next(), StepOutcome::Moved(_)));
            }
            assert_eq!(wizard.current_step(), 7);
            assert_eq!(wizard.go_next(), StepOutcome::Unchanged);

            let before = wizard.data().clone();
            assert_eq!(wizard.go_previous(), StepOutcome::Moved(6));
            assert_eq!(wizard.data(), &before);
        }

        #[test]
        fn test_invalid_step_blocks() {
            let mut wizard = CvWizard::new(YEAR);
            wizard.set_field("branche", FieldValue::text("it"));
            assert!(matches!(
                wizard.go_next(),
                StepOutcome::Blocked { step: 1, .. }
            ));
            assert_eq!(wizard.current_step(), 1);
            assert_eq!(wizard.errors().fields(), vec!["status"]);
        }

        #[test]
        fn test_progress_full_flow() {
            let mut wizard = CvWizard::new(YEAR);
            assert_eq!(wizard.progress(), 0.0);
            wizard.update(complete_apprentice());
            wizard.go_to_step(7);
            assert_eq!(wizard.progress(), 6.0 / 7.0 * 100.0);
        }

        #[test]
        fn test_layout_edit_range_and_progress() {
            let mut wizard = CvWizard::for_layout_edit(complete_apprentice(), YEAR);
            assert_eq!(wizard.mode(), WizardMode::LayoutEdit);
            assert_eq!(wizard.current_step(), 5);
            assert_eq!(wizard.progress(), 0.0);

            assert_eq!(wizard.go_previous(), StepOutcome::Unchanged);
            assert_eq!(wizard.go_next(), StepOutcome::Moved(6));
            assert_eq!(wizard.progress(), 50.0);
            assert_eq!(wizard.go_next(), StepOutcome::Unchanged);
            assert_eq!(wizard.go_to_step(1), StepOutcome::Moved(5));
        }

        #[test]
        fn test_layout_edit_still_validates_layout() {
            let mut profile = complete_apprentice();
            profile.set("layout", FieldValue::text(""));
            let mut wizard = CvWizard::for_layout_edit(profile, YEAR);
            assert!(matches!(
                wizard.go_next(),
                StepOutcome::Blocked { step: 5, .. }
            ));
        }

        #[test]
        fn test_back_to_full_mode_keeps_step() {
            let mut wizard = CvWizard::for_layout_edit(complete_apprentice(), YEAR);
            wizard.go_next();
            wizard.set_mode(WizardMode::Full);
            assert_eq!(wizard.current_step(), 6);
            assert_eq!(wizard.go_previous(), StepOutcome::Moved(5));
            assert_eq!(wizard.go_previous(), StepOutcome::Moved(4));
        }
    }

    mod merge_hook {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_merge_adds_derived_experience() {
            let mut wizard = CvWizard::new(YEAR);
            wizard.update(complete_apprentice());
            let experience = wizard.data().records("experience");
            assert_eq!(experience.len(), 1);
            assert_eq!(experience[0].get("company").unwrap(), "Nordlicht Systemhaus");

            wizard.set_field("city", FieldValue::text("Hamburg"));
            assert_eq!(wizard.data().records("experience").len(), 1);
        }

        fn apprentice_typing(start_year: Option<i64>) -> CvWizard {
            let mut wizard = CvWizard::new(YEAR);
            let mut data = data(&[
                ("branche", FieldValue::text("it")),
                ("status", FieldValue::text("azubi")),
                ("apprenticeship_role", FieldValue::text("Fachinformatiker")),
            ]);
            if let Some(year) = start_year {
                data.set("start_year", FieldValue::Number(year));
            }
            wizard.update(data);
            wizard
        }

        fn focus(wizard: &mut CvWizard, key: &str) {
            while wizard.active_field_spec().unwrap().key != key {
                wizard.next_field();
            }
        }

        fn type_text(wizard: &mut CvWizard, text: &str, now: Instant) {
            for c in text.chars() {
                wizard.input_char(c, now);
            }
        }

        #[test]
        fn test_partial_year_flush_derives_nothing() {
            let mut wizard = apprentice_typing(None);
            wizard.set_field("employer", FieldValue::text("Nordlicht"));
            focus(&mut wizard, "start_year");

            let start = Instant::now();
            type_text(&mut wizard, "20", start);
            let idle = start + Duration::from_millis(400);
            assert!(wizard.flush_if_idle(idle, Duration::from_millis(300)));
            assert_eq!(wizard.data().get("start_year"), Some(&FieldValue::Number(20)));
            assert!(wizard.data().records("experience").is_empty());

            type_text(&mut wizard, "25", idle);
            wizard.blur();
            assert_eq!(
                wizard.data().records("experience"),
                &[record([
                    ("company", "Nordlicht"),
                    ("role", "Fachinformatiker"),
                    ("start_year", "2025"),
                    ("end_year", ""),
                ])]
            );
            assert!(!wizard.validate_step(4).contains("experience"));
        }

        #[test]
        fn test_corrected_employer_replaces_derived_entry() {
            let mut wizard = apprentice_typing(Some(2025));
            focus(&mut wizard, "employer");

            let start = Instant::now();
            type_text(&mut wizard, "Gast", start);
            let idle = start + Duration::from_millis(400);
            assert!(wizard.flush_if_idle(idle, Duration::from_millis(300)));
            assert_eq!(wizard.data().records("experience").len(), 1);

            type_text(&mut wizard, "haus", idle);
            wizard.blur();
            let experience = wizard.data().records("experience");
            assert_eq!(experience.len(), 1);
            assert_eq!(experience[0].get("company").unwrap(), "Gasthaus");
        }

        #[test]
        fn test_draft_persisted_and_restored() {
            let dir = TempDir::new().unwrap();
            let store = DraftStore::new(dir.path());

            let mut wizard = CvWizard::with_store(store.clone(), YEAR);
            wizard.set_field("branche", FieldValue::text("gesundheit"));

            let restored = CvWizard::with_store(store.clone(), YEAR);
            assert_eq!(restored.data().text("branche"), "gesundheit");
            assert_eq!(restored.current_step(), 1);

            restored.clear_draft().unwrap();
            assert!(store.load(CV_DRAFT_KEY).unwrap().is_none());
        }

        #[test]
        fn test_layout_edit_does_not_persist_draft() {
            let dir = TempDir::new().unwrap();
            let store = DraftStore::new(dir.path());
            let mut wizard = CvWizard::with_store(store.clone(), YEAR);
            wizard.set_mode(WizardMode::LayoutEdit);
            wizard.set_field("layout", FieldValue::text("minimal"));
            assert!(store.load(CV_DRAFT_KEY).unwrap().is_none());
        }

        #[test]
        fn test_corrupt_draft_sets_notice() {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("cv_wizard.json"), "][").unwrap();
            let mut wizard = CvWizard::with_store(DraftStore::new(dir.path()), YEAR);
            assert!(wizard.data().is_empty());
            assert!(wizard.take_notice().unwrap().contains("could not be read"));
            assert!(wizard.take_notice().is_none());
        }
    }

    mod payloads {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_profile_payload_contains_visible_fields_only() {
            let mut wizard = CvWizard::new(YEAR);
            wizard.update(complete_apprentice());
            wizard.set_field("school", FieldValue::text("stale"));

            let payload = wizard.profile_payload();
            assert_eq!(payload["branche"], "it");
            assert_eq!(payload["start_year"], 2025);
            assert_eq!(payload["skills"][1], "Netzwerke");
            assert!(payload.get("school").is_none());
        }

        #[test]
        fn test_layout_patch() {
            let mut wizard = CvWizard::for_layout_edit(complete_apprentice(), YEAR);
            wizard.set_field("accent_color", FieldValue::text("green"));
            assert_eq!(
                wizard.layout_patch(),
                serde_json::json!({"accent_color": "green", "layout": "modern"})
            );
        }
    }
}
