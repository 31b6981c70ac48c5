use serde::{Deserialize, Serialize};

/// Policy thresholds separating healthy, warning and critical readings.
///
/// Attendance alerts fire strictly below a bound; ratio alerts fire strictly
/// above one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub teacher_attendance_critical: f64,
    pub teacher_attendance_warning: f64,
    pub student_attendance_critical: f64,
    pub student_attendance_warning: f64,
    pub ratio_critical: u32,
    pub ratio_warning: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            teacher_attendance_critical: 90.0,
            teacher_attendance_warning: 95.0,
            student_attendance_critical: 85.0,
            student_attendance_warning: 90.0,
            ratio_critical: 30,
            ratio_warning: 25,
        }
    }
}

impl AlertThresholds {
    /// Critical bounds must be at least as strict as their warning bounds.
    pub fn is_consistent(&self) -> bool {
        self.teacher_attendance_critical <= self.teacher_attendance_warning
            && self.student_attendance_critical <= self.student_attendance_warning
            && self.ratio_warning <= self.ratio_critical
    }
}
