use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::alerts::{AlertClassifier, AlertThresholds};
use super::domain::{Alert, AttendanceSnapshot, Locale, NarrativeReport, SchoolRecord};
use super::estimator::AttendanceEstimator;
use super::insight::{InsightProvider, InsightRequest};
use super::narrative::{InsightBenchmarks, NarrativeComposer};

/// Which path produced a narrative report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Remote,
    Local,
}

/// Snapshot plus its classification, as rendered by badge/progress widgets.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceAssessment {
    pub snapshot: AttendanceSnapshot,
    pub date_label: String,
    pub student_teacher_ratio: u32,
    pub alerts: Vec<Alert>,
}

/// Narrative report together with the snapshot it describes.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub source: ReportSource,
    pub locale: Locale,
    pub snapshot: AttendanceSnapshot,
    pub report: NarrativeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Service composing the estimator, classifier, composer and remote provider.
pub struct SchoolInsightService<P> {
    estimator: Arc<AttendanceEstimator>,
    classifier: AlertClassifier,
    composer: NarrativeComposer,
    provider: Arc<P>,
    default_locale: Locale,
}

impl<P> SchoolInsightService<P>
where
    P: InsightProvider + 'static,
{
    pub fn new(
        estimator: Arc<AttendanceEstimator>,
        thresholds: AlertThresholds,
        provider: Arc<P>,
        default_locale: Locale,
    ) -> Self {
        Self {
            estimator,
            classifier: AlertClassifier::new(thresholds),
            composer: NarrativeComposer::new(InsightBenchmarks::default()),
            provider,
            default_locale,
        }
    }

    pub fn with_benchmarks(mut self, benchmarks: InsightBenchmarks) -> Self {
        self.composer = NarrativeComposer::new(benchmarks);
        self
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn estimator(&self) -> &AttendanceEstimator {
        &self.estimator
    }

    pub fn snapshot(&self, school: &SchoolRecord) -> Arc<AttendanceSnapshot> {
        self.estimator.estimate(school)
    }

    pub fn assess(&self, school: &SchoolRecord, locale: Option<Locale>) -> AttendanceAssessment {
        let locale = locale.unwrap_or(self.default_locale);
        let snapshot = self.estimator.estimate(school);
        let alerts = self.classifier.classify(&snapshot, locale);

        AttendanceAssessment {
            date_label: snapshot.formatted_date(locale),
            student_teacher_ratio: snapshot.student_teacher_ratio(),
            snapshot: AttendanceSnapshot::clone(&snapshot),
            alerts,
        }
    }

    /// Classifier plus composer, without touching the remote provider.
    pub fn local_report(
        &self,
        school: &SchoolRecord,
        snapshot: &AttendanceSnapshot,
        locale: Locale,
    ) -> NarrativeReport {
        let alerts = self.classifier.classify(snapshot, locale);
        self.composer.compose(school, snapshot, alerts, locale)
    }

    /// Asks the remote provider once and falls back to the local composer on
    /// any failure. The snapshot is cached before the remote call starts, so
    /// abandoning the returned future leaves the cache untouched.
    pub async fn report(
        &self,
        school: &SchoolRecord,
        locale: Option<Locale>,
        bearer_token: Option<&str>,
    ) -> InsightReport {
        let locale = locale.unwrap_or(self.default_locale);
        let snapshot = self.estimator.estimate(school);

        let request = InsightRequest {
            school,
            snapshot: &snapshot,
            locale,
            bearer_token,
        };

        let (source, report, fallback_reason) = match self.provider.request(request).await {
            Ok(mut report) => {
                if report.alerts.is_empty() {
                    report.alerts = self.classifier.classify(&snapshot, locale);
                }
                info!(school_id = %school.id, "regional insight served remotely");
                (ReportSource::Remote, report, None)
            }
            Err(reason) => {
                warn!(
                    school_id = %school.id,
                    %reason,
                    "regional insight unavailable; composing locally"
                );
                let report = self.local_report(school, &snapshot, locale);
                (ReportSource::Local, report, Some(reason.code().to_string()))
            }
        };

        InsightReport {
            source,
            locale,
            snapshot: AttendanceSnapshot::clone(&snapshot),
            report,
            fallback_reason,
        }
    }
}
