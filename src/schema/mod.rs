//! The form surface: field specifications and record assembly.
//!
//! The order of [`form_fields`] is the canonical feature-vector contract —
//! it must match the column order the forest and scaler were fitted against.
//! There is no way to discover that order from the artifacts at runtime, so
//! it is pinned here and cross-checked against artifact shapes at build
//! time (see `PredictorBuilder`).

pub mod labels;
pub mod record;

use lazy_static::lazy_static;

use labels::CodeMap;

pub use record::StudentRecord;

/// Length of the feature vector the model consumes.
pub const FEATURE_COUNT: usize = 35;

/// Form section a field is grouped under, mirroring the original layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Personal,
    Academic,
    Financial,
    Parents,
    Performance,
}

/// The input widget a renderer should build for a field.
#[derive(Debug, Clone, Copy)]
pub enum Widget {
    /// Numeric spinner with optional bounds.
    Number {
        min: Option<f32>,
        max: Option<f32>,
        default: f32,
        step: f32,
    },
    /// Choice selector populated from a code map's display labels.
    Select { map: &'static CodeMap },
}

/// One form field, in canonical feature order.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Machine name; matches the `StudentRecord` field.
    pub name: &'static str,
    /// Human-readable caption for the widget.
    pub label: &'static str,
    pub section: Section,
    pub widget: Widget,
}

fn number(min: Option<f32>, max: Option<f32>, default: f32, step: f32) -> Widget {
    Widget::Number {
        min,
        max,
        default,
        step,
    }
}

lazy_static! {
    static ref FORM_FIELDS: Vec<FieldSpec> = vec![
        FieldSpec {
            name: "marital_status",
            label: "Marital Status",
            section: Section::Personal,
            widget: Widget::Select { map: &labels::MARITAL_STATUS },
        },
        FieldSpec {
            name: "application_mode",
            label: "Application Mode",
            section: Section::Academic,
            widget: Widget::Select { map: &labels::APPLICATION_MODE },
        },
        FieldSpec {
            name: "application_order",
            label: "Application Order",
            section: Section::Academic,
            widget: number(Some(0.0), Some(9.0), 1.0, 1.0),
        },
        FieldSpec {
            name: "course",
            label: "Course",
            section: Section::Academic,
            widget: Widget::Select { map: &labels::COURSE },
        },
        FieldSpec {
            name: "attendance",
            label: "Attendance Mode",
            section: Section::Academic,
            widget: Widget::Select { map: &labels::ATTENDANCE },
        },
        FieldSpec {
            name: "previous_qualification",
            label: "Previous Qualification",
            section: Section::Academic,
            widget: Widget::Select { map: &labels::QUALIFICATION },
        },
        FieldSpec {
            name: "previous_qualification_grade",
            label: "Previous Qualification Grade",
            section: Section::Academic,
            widget: number(Some(0.0), Some(200.0), 120.0, 0.1),
        },
        FieldSpec {
            name: "nationality",
            label: "Nationality",
            section: Section::Personal,
            widget: Widget::Select { map: &labels::NATIONALITY },
        },
        FieldSpec {
            name: "mothers_qualification",
            label: "Mother's Qualification",
            section: Section::Parents,
            widget: Widget::Select { map: &labels::QUALIFICATION },
        },
        FieldSpec {
            name: "fathers_qualification",
            label: "Father's Qualification",
            section: Section::Parents,
            widget: Widget::Select { map: &labels::QUALIFICATION },
        },
        FieldSpec {
            name: "mothers_occupation",
            label: "Mother's Occupation",
            section: Section::Parents,
            widget: Widget::Select { map: &labels::OCCUPATION },
        },
        FieldSpec {
            name: "fathers_occupation",
            label: "Father's Occupation",
            section: Section::Parents,
            widget: Widget::Select { map: &labels::OCCUPATION },
        },
        FieldSpec {
            name: "displaced",
            label: "Displaced",
            section: Section::Personal,
            widget: Widget::Select { map: &labels::YES_NO },
        },
        FieldSpec {
            name: "educational_special_needs",
            label: "Educational Special Needs",
            section: Section::Personal,
            widget: Widget::Select { map: &labels::YES_NO },
        },
        FieldSpec {
            name: "debtor",
            label: "Debtor",
            section: Section::Financial,
            widget: Widget::Select { map: &labels::YES_NO },
        },
        FieldSpec {
            name: "tuition_fees_up_to_date",
            label: "Tuition Fees Up to Date",
            section: Section::Financial,
            widget: Widget::Select { map: &labels::YES_NO },
        },
        FieldSpec {
            name: "gender",
            label: "Gender",
            section: Section::Personal,
            widget: Widget::Select { map: &labels::GENDER },
        },
        FieldSpec {
            name: "scholarship_holder",
            label: "Scholarship Holder",
            section: Section::Academic,
            widget: Widget::Select { map: &labels::YES_NO },
        },
        FieldSpec {
            name: "age_at_enrollment",
            label: "Age at Enrollment",
            section: Section::Personal,
            widget: number(Some(17.0), Some(70.0), 20.0, 1.0),
        },
        FieldSpec {
            name: "international",
            label: "International Student",
            section: Section::Personal,
            widget: Widget::Select { map: &labels::YES_NO },
        },
        FieldSpec {
            name: "curricular_units_1st_sem_credited",
            label: "1st Sem - Credited Units",
            section: Section::Performance,
            widget: number(Some(0.0), None, 0.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_1st_sem_enrolled",
            label: "1st Sem - Enrolled Units",
            section: Section::Performance,
            widget: number(Some(0.0), None, 6.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_1st_sem_evaluations",
            label: "1st Sem - Evaluations",
            section: Section::Performance,
            widget: number(Some(0.0), None, 6.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_1st_sem_approved",
            label: "1st Sem - Approved Units",
            section: Section::Performance,
            widget: number(Some(0.0), None, 6.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_1st_sem_grade",
            label: "1st Sem - Grade",
            section: Section::Performance,
            widget: number(Some(0.0), Some(20.0), 13.0, 0.1),
        },
        FieldSpec {
            name: "curricular_units_1st_sem_without_evaluations",
            label: "1st Sem - Without Evaluations",
            section: Section::Performance,
            widget: number(Some(0.0), None, 0.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_2nd_sem_credited",
            label: "2nd Sem - Credited Units",
            section: Section::Performance,
            widget: number(Some(0.0), None, 0.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_2nd_sem_enrolled",
            label: "2nd Sem - Enrolled Units",
            section: Section::Performance,
            widget: number(Some(0.0), None, 6.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_2nd_sem_evaluations",
            label: "2nd Sem - Evaluations",
            section: Section::Performance,
            widget: number(Some(0.0), None, 6.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_2nd_sem_approved",
            label: "2nd Sem - Approved Units",
            section: Section::Performance,
            widget: number(Some(0.0), None, 6.0, 1.0),
        },
        FieldSpec {
            name: "curricular_units_2nd_sem_grade",
            label: "2nd Sem - Grade",
            section: Section::Performance,
            widget: number(Some(0.0), Some(20.0), 13.0, 0.1),
        },
        FieldSpec {
            name: "curricular_units_2nd_sem_without_evaluations",
            label: "2nd Sem - Without Evaluations",
            section: Section::Performance,
            widget: number(Some(0.0), None, 0.0, 1.0),
        },
        FieldSpec {
            name: "gdp",
            label: "GDP",
            section: Section::Financial,
            widget: number(None, None, 0.0, 0.01),
        },
        FieldSpec {
            name: "unemployment_rate",
            label: "Unemployment Rate",
            section: Section::Financial,
            widget: number(None, None, 0.0, 0.1),
        },
        FieldSpec {
            name: "inflation_rate",
            label: "Inflation Rate",
            section: Section::Financial,
            widget: number(None, None, 0.0, 0.1),
        },
    ];
}

/// The form fields in canonical feature order.
pub fn form_fields() -> &'static [FieldSpec] {
    &FORM_FIELDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_matches_contract() {
        assert_eq!(form_fields().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<_> = form_fields().iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_canonical_order_endpoints() {
        let fields = form_fields();
        assert_eq!(fields[0].name, "marital_status");
        assert_eq!(fields[34].name, "inflation_rate");
    }

    #[test]
    fn test_numeric_defaults_within_bounds() {
        for field in form_fields() {
            if let Widget::Number {
                min, max, default, ..
            } = field.widget
            {
                if let Some(min) = min {
                    assert!(default >= min, "field '{}'", field.name);
                }
                if let Some(max) = max {
                    assert!(default <= max, "field '{}'", field.name);
                }
            }
        }
    }
}
