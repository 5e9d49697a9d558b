use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::labels::{
    CodeMap, APPLICATION_MODE, ATTENDANCE, COURSE, GENDER, MARITAL_STATUS, NATIONALITY, OCCUPATION,
    QUALIFICATION, YES_NO,
};
use super::FEATURE_COUNT;
use crate::predictor::PredictorError;

/// One form submission: every field the model consumes, with categorical
/// values held as the display strings the form offered.
///
/// `Default` reproduces the form's initial widget values, and the struct
/// deserializes from JSON so a record can be piped in from outside the UI.
/// Unset JSON fields fall back to their widget defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecord {
    pub marital_status: String,
    pub application_mode: String,
    pub application_order: u32,
    pub course: String,
    pub attendance: String,
    pub previous_qualification: String,
    pub previous_qualification_grade: f32,
    pub nationality: String,
    pub mothers_qualification: String,
    pub fathers_qualification: String,
    pub mothers_occupation: String,
    pub fathers_occupation: String,
    pub displaced: String,
    pub educational_special_needs: String,
    pub debtor: String,
    pub tuition_fees_up_to_date: String,
    pub gender: String,
    pub scholarship_holder: String,
    pub age_at_enrollment: u32,
    pub international: String,
    pub curricular_units_1st_sem_credited: u32,
    pub curricular_units_1st_sem_enrolled: u32,
    pub curricular_units_1st_sem_evaluations: u32,
    pub curricular_units_1st_sem_approved: u32,
    pub curricular_units_1st_sem_grade: f32,
    pub curricular_units_1st_sem_without_evaluations: u32,
    pub curricular_units_2nd_sem_credited: u32,
    pub curricular_units_2nd_sem_enrolled: u32,
    pub curricular_units_2nd_sem_evaluations: u32,
    pub curricular_units_2nd_sem_approved: u32,
    pub curricular_units_2nd_sem_grade: f32,
    pub curricular_units_2nd_sem_without_evaluations: u32,
    pub gdp: f32,
    pub unemployment_rate: f32,
    pub inflation_rate: f32,
}

impl Default for StudentRecord {
    fn default() -> Self {
        Self {
            marital_status: MARITAL_STATUS.default_label().to_string(),
            application_mode: APPLICATION_MODE.default_label().to_string(),
            application_order: 1,
            course: COURSE.default_label().to_string(),
            attendance: ATTENDANCE.default_label().to_string(),
            previous_qualification: QUALIFICATION.default_label().to_string(),
            previous_qualification_grade: 120.0,
            nationality: NATIONALITY.default_label().to_string(),
            mothers_qualification: QUALIFICATION.default_label().to_string(),
            fathers_qualification: QUALIFICATION.default_label().to_string(),
            mothers_occupation: OCCUPATION.default_label().to_string(),
            fathers_occupation: OCCUPATION.default_label().to_string(),
            displaced: YES_NO.default_label().to_string(),
            educational_special_needs: YES_NO.default_label().to_string(),
            debtor: YES_NO.default_label().to_string(),
            tuition_fees_up_to_date: YES_NO.default_label().to_string(),
            gender: GENDER.default_label().to_string(),
            scholarship_holder: YES_NO.default_label().to_string(),
            age_at_enrollment: 20,
            international: YES_NO.default_label().to_string(),
            curricular_units_1st_sem_credited: 0,
            curricular_units_1st_sem_enrolled: 6,
            curricular_units_1st_sem_evaluations: 6,
            curricular_units_1st_sem_approved: 6,
            curricular_units_1st_sem_grade: 13.0,
            curricular_units_1st_sem_without_evaluations: 0,
            curricular_units_2nd_sem_credited: 0,
            curricular_units_2nd_sem_enrolled: 6,
            curricular_units_2nd_sem_evaluations: 6,
            curricular_units_2nd_sem_approved: 6,
            curricular_units_2nd_sem_grade: 13.0,
            curricular_units_2nd_sem_without_evaluations: 0,
            gdp: 0.0,
            unemployment_rate: 0.0,
            inflation_rate: 0.0,
        }
    }
}

fn translate(map: &CodeMap, value: &str, field: &str) -> Result<f32, PredictorError> {
    map.code(value).map(|code| code as f32).ok_or_else(|| {
        PredictorError::ValidationError(format!(
            "'{value}' is not a known {} choice for field '{field}'",
            map.name()
        ))
    })
}

impl StudentRecord {
    /// Assembles the ordered feature vector the model was trained on.
    ///
    /// The order and count here are the training contract; see the schema
    /// module docs. Fails with a `ValidationError` if a categorical value is
    /// not one of the display strings its map offers.
    pub fn to_features(&self) -> Result<Array1<f32>, PredictorError> {
        let features = vec![
            translate(&MARITAL_STATUS, &self.marital_status, "marital_status")?,
            translate(&APPLICATION_MODE, &self.application_mode, "application_mode")?,
            self.application_order as f32,
            translate(&COURSE, &self.course, "course")?,
            translate(&ATTENDANCE, &self.attendance, "attendance")?,
            translate(
                &QUALIFICATION,
                &self.previous_qualification,
                "previous_qualification",
            )?,
            self.previous_qualification_grade,
            translate(&NATIONALITY, &self.nationality, "nationality")?,
            translate(
                &QUALIFICATION,
                &self.mothers_qualification,
                "mothers_qualification",
            )?,
            translate(
                &QUALIFICATION,
                &self.fathers_qualification,
                "fathers_qualification",
            )?,
            translate(&OCCUPATION, &self.mothers_occupation, "mothers_occupation")?,
            translate(&OCCUPATION, &self.fathers_occupation, "fathers_occupation")?,
            translate(&YES_NO, &self.displaced, "displaced")?,
            translate(
                &YES_NO,
                &self.educational_special_needs,
                "educational_special_needs",
            )?,
            translate(&YES_NO, &self.debtor, "debtor")?,
            translate(
                &YES_NO,
                &self.tuition_fees_up_to_date,
                "tuition_fees_up_to_date",
            )?,
            translate(&GENDER, &self.gender, "gender")?,
            translate(&YES_NO, &self.scholarship_holder, "scholarship_holder")?,
            self.age_at_enrollment as f32,
            translate(&YES_NO, &self.international, "international")?,
            self.curricular_units_1st_sem_credited as f32,
            self.curricular_units_1st_sem_enrolled as f32,
            self.curricular_units_1st_sem_evaluations as f32,
            self.curricular_units_1st_sem_approved as f32,
            self.curricular_units_1st_sem_grade,
            self.curricular_units_1st_sem_without_evaluations as f32,
            self.curricular_units_2nd_sem_credited as f32,
            self.curricular_units_2nd_sem_enrolled as f32,
            self.curricular_units_2nd_sem_evaluations as f32,
            self.curricular_units_2nd_sem_approved as f32,
            self.curricular_units_2nd_sem_grade,
            self.curricular_units_2nd_sem_without_evaluations as f32,
            self.gdp,
            self.unemployment_rate,
            self.inflation_rate,
        ];
        debug_assert_eq!(features.len(), FEATURE_COUNT);
        Ok(Array1::from_vec(features))
    }
}
