use super::common::*;

use crate::workflows::attendance::{
    AlertClassifier, AttendanceSnapshot, InsightBenchmarks, Locale, NarrativeComposer,
    NarrativeReport, SchoolRecord,
};

fn compose(
    school: &SchoolRecord,
    snapshot: &AttendanceSnapshot,
    locale: Locale,
) -> NarrativeReport {
    let alerts = AlertClassifier::default().classify(snapshot, locale);
    NarrativeComposer::default().compose(school, snapshot, alerts, locale)
}

#[test]
fn report_has_the_documented_shape() {
    let school = lycee_tunis();
    let report = compose(&school, &snapshot(50, 44, 1000, 950), Locale::French);

    assert!(report.summary.contains("Lycée Pilote de Tunis"));
    assert!(report.summary.contains("Bab Bhar"));
    assert!(report.summary.contains("03/11/2025"));
    assert!(report.summary.contains("88.0%"));
    assert!(report.summary.contains("95.0%"));
    assert_eq!(report.statistics.len(), 8);
    assert_eq!(report.statistics[0], "Code de l'établissement : 1042");
    assert_eq!(report.trends.len(), 3);
    assert_eq!(report.insights.len(), 4);
    assert_eq!(report.sources.len(), 3);
    assert!(!report.alerts.is_empty());
}

#[test]
fn insight_wording_branches_on_benchmarks() {
    let school = lycee_tunis();

    let healthy = compose(&school, &snapshot(50, 48, 1000, 940), Locale::English);
    assert_eq!(
        healthy.insights[0],
        "Teacher attendance (96.0%) meets the 95% target."
    );
    assert_eq!(
        healthy.insights[1],
        "Student attendance (94.0%) is at or above the 93% benchmark."
    );
    assert_eq!(
        healthy.insights[2],
        "At 20 students per teacher, supervision remains comfortable (benchmark 20)."
    );
    assert_eq!(healthy.insights[3], "No indicator requires immediate action.");

    let strained = compose(&school, &snapshot(47, 44, 1000, 920), Locale::English);
    assert!(strained.insights[0].contains("is below the 95% target"));
    assert!(strained.insights[1].contains("trails the 93% benchmark"));
    assert!(strained.insights[2].starts_with("At 21 students per teacher, classes exceed"));
    assert_eq!(
        strained.insights[3],
        "1 indicator(s) need follow-up, 0 of them critical."
    );
}

#[test]
fn alerts_pass_through_untouched() {
    let school = lycee_tunis();
    let snapshot = snapshot(20, 17, 700, 560);
    let alerts = AlertClassifier::default().classify(&snapshot, Locale::Arabic);

    let report =
        NarrativeComposer::default().compose(&school, &snapshot, alerts.clone(), Locale::Arabic);

    assert_eq!(report.alerts, alerts);
    assert!(report.insights[3].starts_with("3 "));
}

#[test]
fn arabic_reports_use_the_arabic_name() {
    let school = lycee_tunis();
    let report = compose(&school, &snapshot(50, 48, 1000, 940), Locale::Arabic);

    assert!(report.summary.contains("المعهد النموذجي بتونس"));
    assert!(!report.summary.contains("Lycée Pilote"));
    assert_eq!(report.sources[1], "المندوبية الجهوية للتربية");
}

#[test]
fn missing_location_fields_degrade_to_placeholders() {
    let school = SchoolRecord::new("9001", "");
    let report = compose(&school, &snapshot(20, 19, 400, 380), Locale::English);

    assert!(report.summary.starts_with("9001 (school) is located in the unspecified delegation"));
    assert_eq!(report.statistics[1], "Type: school");
}

#[test]
fn composition_is_deterministic() {
    let school = lycee_tunis();
    let snapshot = snapshot(50, 44, 1000, 950);

    assert_eq!(
        compose(&school, &snapshot, Locale::French),
        compose(&school, &snapshot, Locale::French)
    );
}

#[test]
fn benchmarks_are_adjustable() {
    let school = lycee_tunis();
    let snapshot = snapshot(50, 48, 1000, 940);
    let composer = NarrativeComposer::new(InsightBenchmarks {
        teacher_attendance_good: 97.0,
        ..InsightBenchmarks::default()
    });

    let report = composer.compose(&school, &snapshot, Vec::new(), Locale::English);

    assert!(report.insights[0].contains("is below the 97% target"));
    assert!(report.alerts.is_empty());
}
