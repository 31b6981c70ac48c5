use super::domain::{
    Alert, AlertSeverity, AttendanceSnapshot, Locale, NarrativeReport, SchoolRecord,
};
use super::phrases::Phrases;
use serde::{Deserialize, Serialize};

/// "Good" levels the insight wording branches on. Distinct from the alert
/// thresholds: a school can avoid every alert and still miss these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsightBenchmarks {
    pub teacher_attendance_good: f64,
    pub student_attendance_good: f64,
    pub ratio_good: u32,
}

impl Default for InsightBenchmarks {
    fn default() -> Self {
        Self {
            teacher_attendance_good: 95.0,
            student_attendance_good: 93.0,
            ratio_good: 20,
        }
    }
}

/// Builds the local narrative used when the regional insight service is
/// unavailable. Deterministic: all figures come from the snapshot.
#[derive(Debug, Clone, Default)]
pub struct NarrativeComposer {
    benchmarks: InsightBenchmarks,
}

impl NarrativeComposer {
    pub fn new(benchmarks: InsightBenchmarks) -> Self {
        Self { benchmarks }
    }

    pub fn compose(
        &self,
        school: &SchoolRecord,
        snapshot: &AttendanceSnapshot,
        alerts: Vec<Alert>,
        locale: Locale,
    ) -> NarrativeReport {
        let phrases = Phrases::new(locale);
        let ctx = phrases.context(school, snapshot);
        let benchmarks = &self.benchmarks;

        let flagged = alerts
            .iter()
            .filter(|alert| alert.severity != AlertSeverity::Info)
            .count();
        let critical = alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Critical)
            .count();

        let insights = vec![
            phrases.teacher_insight(
                snapshot.teacher_attendance_rate,
                benchmarks.teacher_attendance_good,
                snapshot.teacher_attendance_rate >= benchmarks.teacher_attendance_good,
            ),
            phrases.student_insight(
                snapshot.student_attendance_rate,
                benchmarks.student_attendance_good,
                snapshot.student_attendance_rate >= benchmarks.student_attendance_good,
            ),
            phrases.ratio_insight(
                ctx.ratio,
                benchmarks.ratio_good,
                ctx.ratio <= benchmarks.ratio_good,
            ),
            phrases.alert_load_insight(flagged, critical),
        ];

        NarrativeReport {
            summary: phrases.summary(&ctx),
            statistics: phrases.statistics(&ctx),
            trends: phrases.trends(&ctx),
            insights,
            alerts,
            sources: phrases.sources(),
        }
    }
}
