mod config;
pub(crate) mod rules;

pub use config::AlertThresholds;

use super::domain::{Alert, AttendanceSnapshot, Locale};
use super::phrases::Phrases;

/// Stateless classifier turning a snapshot into severity-ranked alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertClassifier {
    thresholds: AlertThresholds,
}

impl AlertClassifier {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Never returns an empty list: a snapshot that trips no rule yields a
    /// single informational "good performance" alert.
    pub fn classify(&self, snapshot: &AttendanceSnapshot, locale: Locale) -> Vec<Alert> {
        let phrases = Phrases::new(locale);
        let findings = rules::evaluate(snapshot, &self.thresholds);

        if findings.is_empty() {
            return vec![phrases.good_performance_alert()];
        }

        findings
            .iter()
            .map(|finding| phrases.alert(finding))
            .collect()
    }
}
