use std::collections::HashSet;

use alumnus::schema::{form_fields, labels, StudentRecord, Widget, FEATURE_COUNT};

#[test]
fn test_round_trip_on_every_offered_choice() {
    // code(label) then label(code) is the identity for every string a
    // choice widget can offer.
    for field in form_fields() {
        if let Widget::Select { map } = field.widget {
            for choice in map.labels() {
                let code = map.code(choice).expect("offered choice must have a code");
                assert_eq!(map.label(code), Some(choice), "field '{}'", field.name);
            }
        }
    }
}

#[test]
fn test_display_strings_unique_within_each_map() {
    for map in labels::all_maps() {
        let unique: HashSet<_> = map.labels().collect();
        assert_eq!(
            unique.len(),
            map.len(),
            "duplicate display string in map '{}'",
            map.name()
        );
    }
}

#[test]
fn test_default_record_matches_widget_defaults() {
    // The default record, the form field defaults and the assembled vector
    // must agree, field by field, in canonical order.
    let features = StudentRecord::default().to_features().unwrap();
    assert_eq!(features.len(), FEATURE_COUNT);

    for (idx, field) in form_fields().iter().enumerate() {
        match field.widget {
            Widget::Number { default, .. } => {
                assert_eq!(features[idx], default, "field '{}'", field.name);
            }
            Widget::Select { map } => {
                let code = map.code(map.default_label()).unwrap() as f32;
                assert_eq!(features[idx], code, "field '{}'", field.name);
            }
        }
    }
}

#[test]
fn test_every_choice_assembles() {
    // Any single choice a widget offers must survive vector assembly.
    for choice in labels::NATIONALITY.labels() {
        let record = StudentRecord {
            nationality: choice.to_string(),
            ..Default::default()
        };
        let features = record.to_features().unwrap();
        assert_eq!(features[7], labels::NATIONALITY.code(choice).unwrap() as f32);
    }
}

#[test]
fn test_record_round_trips_through_json() {
    let record = StudentRecord {
        course: "Informatics Engineering".to_string(),
        age_at_enrollment: 24,
        gdp: 1.74,
        ..Default::default()
    };
    let json = serde_json::to_string(&record).unwrap();
    let back: StudentRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.course, "Informatics Engineering");
    assert_eq!(
        back.to_features().unwrap(),
        record.to_features().unwrap()
    );
}
