//! Code <-> display-label translation for the categorical form fields.
//!
//! Every categorical feature the model consumes was integer-coded at
//! training time. The tables below are the single source of truth for those
//! codes; a [`CodeMap`] builds both lookup directions from one table once,
//! instead of reverse-scanning on every interaction.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Bidirectional mapping between integer feature codes and the display
/// strings offered in the form.
///
/// Built once from a static table. Construction panics on a duplicate code
/// or label, since either would make the reverse lookup ambiguous; the
/// tables are compile-time data, so this can only fire on a bad edit.
#[derive(Debug)]
pub struct CodeMap {
    name: &'static str,
    entries: &'static [(i64, &'static str)],
    by_label: HashMap<&'static str, i64>,
    by_code: HashMap<i64, &'static str>,
}

impl CodeMap {
    fn new(name: &'static str, entries: &'static [(i64, &'static str)]) -> Self {
        let mut by_label = HashMap::with_capacity(entries.len());
        let mut by_code = HashMap::with_capacity(entries.len());
        for &(code, label) in entries {
            if by_code.insert(code, label).is_some() {
                panic!("duplicate code {code} in map '{name}'");
            }
            if by_label.insert(label, code).is_some() {
                panic!("duplicate label '{label}' in map '{name}'");
            }
        }
        Self {
            name,
            entries,
            by_label,
            by_code,
        }
    }

    /// Name of the categorical domain this map covers.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ordered display strings, for populating a choice widget.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(_, label)| label)
    }

    /// The display string offered first in the widget.
    pub fn default_label(&self) -> &'static str {
        self.entries[0].1
    }

    /// Integer code for a chosen display string.
    pub fn code(&self, label: &str) -> Option<i64> {
        self.by_label.get(label).copied()
    }

    /// Display string for an integer code.
    pub fn label(&self, code: i64) -> Option<&'static str> {
        self.by_code.get(&code).copied()
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const MARITAL_STATUS_TABLE: &[(i64, &str)] = &[
    (1, "single"),
    (2, "married"),
    (3, "widower"),
    (4, "divorced"),
    (5, "facto union"),
    (6, "legally separated"),
];

const OCCUPATION_TABLE: &[(i64, &str)] = &[
    (0, "Student"),
    (1, "Legislative/Executive"),
    (2, "Scientific specialists"),
    (3, "Technicians"),
    (4, "Admin staff"),
    (5, "Services/Sellers"),
    (6, "Agriculture/Fisheries"),
    (7, "Industry/Construction"),
    (8, "Machine Operators"),
    (9, "Unskilled Workers"),
    (10, "Armed Forces"),
    (90, "Other"),
    (99, "Blank"),
    (101, "Armed Forces Officers"),
    (102, "Armed Forces Sergeants"),
    (103, "Other Armed Forces"),
    (112, "Admin/Commercial Directors"),
    (114, "Hotel/Trade Directors"),
    (121, "Science/Engineering Specialists"),
    (122, "Health professionals"),
    (123, "Teachers"),
    (124, "Finance/Admin Specialists"),
    (125, "ICT Specialists"),
    (131, "Science/Engineering Technicians"),
    (132, "Health Technicians"),
    (134, "Legal/Social/Cultural Technicians"),
    (135, "ICT Technicians"),
    (141, "Secretaries/Data Operators"),
    (143, "Finance/Admin Operators"),
    (144, "Other Admin Support"),
    (151, "Personal service workers"),
    (152, "Sellers"),
    (153, "Personal care workers"),
    (154, "Security services"),
    (161, "Farmers (market)"),
    (163, "Subsistence farmers"),
    (171, "Construction workers"),
    (172, "Metallurgy workers"),
    (173, "Artisan/Precision workers"),
    (174, "Electricians/Electronics"),
    (175, "Processing workers"),
    (181, "Plant operators"),
    (182, "Assembly workers"),
    (183, "Drivers/Operators"),
    (191, "Cleaners"),
    (192, "Unskilled in agriculture"),
    (193, "Unskilled in industry"),
    (194, "Meal assistants"),
    (195, "Street vendors"),
];

const QUALIFICATION_TABLE: &[(i64, &str)] = &[
    (1, "Secondary education"),
    (2, "Higher education - bachelor's degree"),
    (3, "Higher education - degree"),
    (4, "Higher education - master's"),
    (5, "Higher education - doctorate"),
    (6, "Frequency of higher education"),
    (9, "12th year of schooling - not completed"),
    (10, "11th year of schooling - not completed"),
    (12, "Other - 11th year of schooling"),
    (14, "10th year of schooling"),
    (15, "10th year of schooling - not completed"),
    (19, "Basic education 3rd cycle"),
    (38, "Basic education 2nd cycle"),
    (39, "Technological specialization"),
    (40, "Higher education - degree (1st cycle)"),
    (42, "Professional higher technical"),
    (43, "Higher education - master (2nd cycle)"),
];

const YES_NO_TABLE: &[(i64, &str)] = &[(1, "yes"), (0, "no")];

const GENDER_TABLE: &[(i64, &str)] = &[(1, "male"), (0, "female")];

const ATTENDANCE_TABLE: &[(i64, &str)] = &[(1, "daytime"), (0, "evening")];

const NATIONALITY_TABLE: &[(i64, &str)] = &[
    (1, "Portuguese"),
    (2, "German"),
    (6, "Spanish"),
    (11, "Italian"),
    (13, "Dutch"),
    (14, "English"),
    (17, "Lithuanian"),
    (21, "Angolan"),
    (22, "Cape Verdean"),
    (24, "Guinean"),
    (25, "Mozambican"),
    (26, "Santomean"),
    (32, "Turkish"),
    (41, "Brazilian"),
    (62, "Romanian"),
    (100, "Moldova"),
    (101, "Mexican"),
    (103, "Ukrainian"),
    (105, "Russian"),
    (108, "Cuban"),
    (109, "Colombian"),
];

const COURSE_TABLE: &[(i64, &str)] = &[
    (33, "Biofuel Production"),
    (171, "Animation/Multimedia"),
    (8014, "Social Service (evening)"),
    (9003, "Agronomy"),
    (9070, "Communication Design"),
    (9085, "Veterinary Nursing"),
    (9119, "Informatics Engineering"),
    (9130, "Equinculture"),
    (9147, "Management"),
    (9238, "Social Service"),
    (9254, "Tourism"),
    (9500, "Nursing"),
    (9556, "Oral Hygiene"),
    (9670, "Ad/Marketing"),
    (9773, "Journalism"),
    (9853, "Basic Education"),
    (9991, "Management (evening)"),
];

const APPLICATION_MODE_TABLE: &[(i64, &str)] = &[
    (1, "1st phase - general"),
    (2, "Ordinance 612/93"),
    (5, "Special - Azores"),
    (7, "Other higher courses"),
    (10, "Ordinance 854-B/99"),
    (15, "International student"),
    (16, "Special - Madeira"),
    (17, "2nd phase - general"),
    (18, "3rd phase - general"),
    (26, "Different Plan"),
    (27, "Other Institution"),
    (39, "Over 23 years old"),
    (42, "Transfer"),
    (43, "Change course"),
    (44, "Tech diploma"),
    (51, "Change institution/course"),
    (53, "Short cycle diploma"),
    (57, "Change institution/course (Int.)"),
];

lazy_static! {
    pub static ref MARITAL_STATUS: CodeMap = CodeMap::new("marital_status", MARITAL_STATUS_TABLE);
    pub static ref OCCUPATION: CodeMap = CodeMap::new("occupation", OCCUPATION_TABLE);
    pub static ref QUALIFICATION: CodeMap = CodeMap::new("qualification", QUALIFICATION_TABLE);
    pub static ref YES_NO: CodeMap = CodeMap::new("yes_no", YES_NO_TABLE);
    pub static ref GENDER: CodeMap = CodeMap::new("gender", GENDER_TABLE);
    pub static ref ATTENDANCE: CodeMap = CodeMap::new("attendance", ATTENDANCE_TABLE);
    pub static ref NATIONALITY: CodeMap = CodeMap::new("nationality", NATIONALITY_TABLE);
    pub static ref COURSE: CodeMap = CodeMap::new("course", COURSE_TABLE);
    pub static ref APPLICATION_MODE: CodeMap =
        CodeMap::new("application_mode", APPLICATION_MODE_TABLE);
}

/// All categorical maps, for property checks and schema dumps.
pub fn all_maps() -> [&'static CodeMap; 9] {
    [
        &MARITAL_STATUS,
        &OCCUPATION,
        &QUALIFICATION,
        &YES_NO,
        &GENDER,
        &ATTENDANCE,
        &NATIONALITY,
        &COURSE,
        &APPLICATION_MODE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_round_trip_law() {
        // label -> code -> label is the identity on every offered string.
        for map in all_maps() {
            for label in map.labels() {
                let code = map
                    .code(label)
                    .unwrap_or_else(|| panic!("{}: no code for '{label}'", map.name()));
                assert_eq!(map.label(code), Some(label), "map '{}'", map.name());
            }
        }
    }

    #[test]
    fn test_no_duplicate_labels_or_codes() {
        for map in all_maps() {
            let labels: HashSet<_> = map.labels().collect();
            assert_eq!(labels.len(), map.len(), "map '{}'", map.name());
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(MARITAL_STATUS.code("single"), Some(1));
        assert_eq!(COURSE.code("Nursing"), Some(9500));
        assert_eq!(OCCUPATION.code("Street vendors"), Some(195));
        assert_eq!(APPLICATION_MODE.label(39), Some("Over 23 years old"));
        assert_eq!(GENDER.code("female"), Some(0));
    }

    #[test]
    fn test_unknown_label_is_none() {
        assert_eq!(NATIONALITY.code("Martian"), None);
        assert_eq!(NATIONALITY.label(9999), None);
    }

    #[test]
    fn test_default_label_is_first_entry() {
        assert_eq!(MARITAL_STATUS.default_label(), "single");
        assert_eq!(YES_NO.default_label(), "yes");
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(OCCUPATION.len(), 49);
        assert_eq!(QUALIFICATION.len(), 17);
        assert_eq!(NATIONALITY.len(), 21);
        assert_eq!(COURSE.len(), 17);
        assert_eq!(APPLICATION_MODE.len(), 18);
    }
}
