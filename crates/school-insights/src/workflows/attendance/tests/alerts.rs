use super::common::*;

use crate::workflows::attendance::{
    AlertClassifier, AlertMetric, AlertSeverity, AlertThresholds, Locale,
};

fn classifier() -> AlertClassifier {
    AlertClassifier::default()
}

#[test]
fn ratio_of_thirty_two_is_critical() {
    let alerts = classifier().classify(&snapshot(25, 25, 800, 760), Locale::French);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].metric, Some(AlertMetric::StudentTeacherRatio));
    assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    assert!(alerts[0].description.contains("32"));
    assert!(alerts[0].description.contains("30"));
}

#[test]
fn ratio_of_twenty_five_raises_nothing() {
    let alerts = classifier().classify(&snapshot(32, 32, 800, 760), Locale::French);

    assert!(alerts
        .iter()
        .all(|alert| alert.metric != Some(AlertMetric::StudentTeacherRatio)));
    assert_eq!(severities(&alerts), vec![AlertSeverity::Info]);
}

#[test]
fn ratio_between_bounds_is_a_warning() {
    let alerts = classifier().classify(&snapshot(30, 30, 780, 760), Locale::English);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    assert_eq!(alerts[0].title, "High student/teacher ratio");
}

#[test]
fn lycee_scenario_yields_exactly_one_critical_teacher_alert() {
    let alerts = classifier().classify(&snapshot(50, 44, 1000, 950), Locale::English);

    assert_eq!(alerts.len(), 1);
    let alert = &alerts[0];
    assert_eq!(alert.metric, Some(AlertMetric::TeacherAttendance));
    assert_eq!(alert.severity, AlertSeverity::Critical);
    assert_eq!(alert.title, "Critical teacher absenteeism");
    assert!(alert.description.contains("88.0%"));
    assert!(alert.description.contains("90%"));
    assert!(alert.action.starts_with("Investigate the causes of absence"));
}

#[test]
fn attendance_edges_are_half_open() {
    let at_critical_edge = classifier().classify(&snapshot(50, 45, 1000, 950), Locale::French);
    assert_eq!(at_critical_edge[0].metric, Some(AlertMetric::TeacherAttendance));
    assert_eq!(at_critical_edge[0].severity, AlertSeverity::Warning);

    let at_warning_edge = classifier().classify(&snapshot(20, 19, 400, 380), Locale::French);
    assert_eq!(at_warning_edge.len(), 1);
    assert_eq!(at_warning_edge[0].metric, Some(AlertMetric::OverallPerformance));
    assert_eq!(at_warning_edge[0].severity, AlertSeverity::Info);

    let student_edge = classifier().classify(&snapshot(40, 40, 800, 680), Locale::French);
    assert_eq!(student_edge[0].metric, Some(AlertMetric::StudentAttendance));
    assert_eq!(student_edge[0].severity, AlertSeverity::Warning);
}

#[test]
fn alerts_follow_teacher_student_ratio_order() {
    let alerts = classifier().classify(&snapshot(20, 17, 700, 560), Locale::French);

    let metrics: Vec<_> = alerts.iter().filter_map(|alert| alert.metric).collect();
    assert_eq!(
        metrics,
        vec![
            AlertMetric::TeacherAttendance,
            AlertMetric::StudentAttendance,
            AlertMetric::StudentTeacherRatio,
        ]
    );
    assert!(alerts
        .iter()
        .all(|alert| alert.severity == AlertSeverity::Critical));
}

#[test]
fn fewer_teachers_present_never_lowers_severity() {
    fn rank(severity: Option<AlertSeverity>) -> u8 {
        match severity {
            None | Some(AlertSeverity::Info) => 0,
            Some(AlertSeverity::Warning) => 1,
            Some(AlertSeverity::Critical) => 2,
        }
    }

    let mut previous = 0;
    for present in (0..=100).rev() {
        let alerts = classifier().classify(&snapshot(100, present, 1000, 960), Locale::French);
        let teacher = alerts
            .iter()
            .find(|alert| alert.metric == Some(AlertMetric::TeacherAttendance))
            .map(|alert| alert.severity);

        let current = rank(teacher);
        assert!(current >= previous, "severity dropped at {present} present");
        previous = current;

        if present < 90 {
            assert_eq!(teacher, Some(AlertSeverity::Critical));
        }
        if present >= 95 {
            assert_eq!(severities(&alerts), vec![AlertSeverity::Info]);
        }
    }
}

#[test]
fn zero_teachers_do_not_trip_the_ratio_rule() {
    let alerts = classifier().classify(&snapshot(0, 0, 300, 290), Locale::French);

    assert!(alerts
        .iter()
        .all(|alert| alert.metric != Some(AlertMetric::StudentTeacherRatio)));
    assert_eq!(alerts[0].metric, Some(AlertMetric::TeacherAttendance));
}

#[test]
fn every_locale_renders_its_own_table() {
    let snapshot = snapshot(50, 44, 1000, 950);
    let french = classifier().classify(&snapshot, Locale::French);
    let arabic = classifier().classify(&snapshot, Locale::Arabic);

    assert_eq!(french[0].title, "Absentéisme critique des enseignants");
    assert_eq!(arabic[0].title, "غياب حرج للمدرسين");
    assert_eq!(french[0].severity, arabic[0].severity);
}

#[test]
fn custom_thresholds_move_the_bands() {
    let strict = AlertClassifier::new(AlertThresholds {
        teacher_attendance_critical: 95.0,
        teacher_attendance_warning: 98.0,
        ..AlertThresholds::default()
    });

    let alerts = strict.classify(&snapshot(50, 48, 1000, 950), Locale::English);

    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    assert!(alerts[0].description.contains("98%"));
}
