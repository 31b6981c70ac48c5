use super::config::AlertThresholds;
use crate::workflows::attendance::domain::{AlertMetric, AlertSeverity, AttendanceSnapshot};

/// A triggered rule before it is rendered into localized text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Finding {
    pub metric: AlertMetric,
    pub severity: AlertSeverity,
    pub observed: f64,
    pub benchmark: f64,
}

/// Evaluates every rule in the fixed order teacher attendance, student
/// attendance, student/teacher ratio.
pub(crate) fn evaluate(
    snapshot: &AttendanceSnapshot,
    thresholds: &AlertThresholds,
) -> Vec<Finding> {
    let mut findings = Vec::with_capacity(3);

    if let Some((severity, benchmark)) = below_band(
        snapshot.teacher_attendance_rate,
        thresholds.teacher_attendance_critical,
        thresholds.teacher_attendance_warning,
    ) {
        findings.push(Finding {
            metric: AlertMetric::TeacherAttendance,
            severity,
            observed: snapshot.teacher_attendance_rate,
            benchmark,
        });
    }

    if let Some((severity, benchmark)) = below_band(
        snapshot.student_attendance_rate,
        thresholds.student_attendance_critical,
        thresholds.student_attendance_warning,
    ) {
        findings.push(Finding {
            metric: AlertMetric::StudentAttendance,
            severity,
            observed: snapshot.student_attendance_rate,
            benchmark,
        });
    }

    let ratio = snapshot.student_teacher_ratio();
    if let Some((severity, benchmark)) =
        above_band(ratio, thresholds.ratio_critical, thresholds.ratio_warning)
    {
        findings.push(Finding {
            metric: AlertMetric::StudentTeacherRatio,
            severity,
            observed: f64::from(ratio),
            benchmark: f64::from(benchmark),
        });
    }

    findings
}

fn below_band(value: f64, critical: f64, warning: f64) -> Option<(AlertSeverity, f64)> {
    if value < critical {
        Some((AlertSeverity::Critical, critical))
    } else if value < warning {
        Some((AlertSeverity::Warning, warning))
    } else {
        None
    }
}

fn above_band(value: u32, critical: u32, warning: u32) -> Option<(AlertSeverity, u32)> {
    if value > critical {
        Some((AlertSeverity::Critical, critical))
    } else if value > warning {
        Some((AlertSeverity::Warning, warning))
    } else {
        None
    }
}
