//! School attendance estimation, alert classification and narrative reports.
//!
//! A school record flows through the [`AttendanceEstimator`] into a cached
//! [`AttendanceSnapshot`]. The [`SchoolInsightService`] then asks the
//! regional insight provider for a narrative and, when that fails, builds an
//! equivalent [`NarrativeReport`] from the [`AlertClassifier`] and
//! [`NarrativeComposer`].

pub mod alerts;
pub mod domain;
pub mod estimator;
pub mod insight;
pub mod narrative;
mod phrases;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use alerts::{AlertClassifier, AlertThresholds};
pub use domain::{
    Alert, AlertMetric, AlertSeverity, AttendanceSnapshot, Headcount, Locale, NarrativeReport,
    SchoolId, SchoolRecord,
};
pub use estimator::{AttendanceEstimator, RandomSource, SeededRandom, SnapshotCache};
pub use insight::{
    InsightBackend, InsightProvider, InsightRequest, InsightUnavailable, OfflineInsightProvider,
    RegionalInsightClient,
};
pub use narrative::{InsightBenchmarks, NarrativeComposer};
pub use router::insight_router;
pub use service::{AttendanceAssessment, InsightReport, ReportSource, SchoolInsightService};
