use school_insights::workflows::attendance::{
    AlertClassifier, AlertSeverity, AttendanceEstimator, Locale, SchoolId,
};
use school_insights::workflows::roster::{RosterImportError, RosterImporter};

#[test]
fn sample_roster_imports_every_identified_school() {
    let data = include_bytes!("../tunis_schools.csv");

    let schools = RosterImporter::from_reader(&data[..]).expect("sample roster imports");

    assert_eq!(schools.len(), 5);
    assert_eq!(schools[0].id, SchoolId::new("1042"));
    assert_eq!(schools[0].name_ar.as_deref(), Some("المعهد النموذجي بتونس"));
    assert_eq!(schools[1].teachers, None);
    assert_eq!(schools[1].students, Some(640));
    assert_eq!(schools[3].school_type, "مدرسة ابتدائية");
    assert!(schools.iter().all(|school| !school.id.as_str().is_empty()));
}

#[test]
fn imported_schools_flow_through_estimation_and_classification() {
    let data = include_bytes!("../tunis_schools.csv");
    let schools = RosterImporter::from_reader(&data[..]).expect("sample roster imports");
    let estimator = AttendanceEstimator::seeded(77);
    let classifier = AlertClassifier::default();

    for school in &schools {
        let snapshot = estimator.estimate(school);
        let alerts = classifier.classify(&snapshot, Locale::French);

        if let Some(teachers) = school.teachers {
            assert_eq!(snapshot.teachers_total, teachers);
        }
        assert!(!alerts.is_empty());
        assert!(alerts.iter().all(|alert| {
            alert.severity != AlertSeverity::Info || alerts.len() == 1
        }));
    }

    assert_eq!(estimator.cache().len(), schools.len());
}

#[test]
fn missing_roster_file_reports_an_io_error() {
    match RosterImporter::from_path("does/not/exist.csv") {
        Err(RosterImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}
