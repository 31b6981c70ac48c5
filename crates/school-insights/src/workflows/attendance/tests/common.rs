use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::attendance::estimator::{CountRange, RateRange};
use crate::workflows::attendance::{
    insight_router, Alert, AlertSeverity, AlertThresholds, AttendanceEstimator,
    AttendanceSnapshot, Headcount, InsightProvider, InsightRequest, InsightUnavailable, Locale,
    NarrativeReport, RandomSource, SchoolId, SchoolInsightService, SchoolRecord,
};

pub(super) fn observed_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date")
}

pub(super) fn lycee_tunis() -> SchoolRecord {
    SchoolRecord {
        id: SchoolId::new("1042"),
        name: "Lycée Pilote de Tunis".to_string(),
        name_ar: Some("المعهد النموذجي بتونس".to_string()),
        school_type: "Lycée".to_string(),
        delegation: "Bab Bhar".to_string(),
        region: "Tunis".to_string(),
        teachers: Some(50),
        students: Some(1000),
        advisors: Some(4),
    }
}

pub(super) fn rural_primary() -> SchoolRecord {
    SchoolRecord {
        id: SchoolId::new("3307"),
        name: "Ecole Primaire Oued Zarga".to_string(),
        name_ar: None,
        school_type: "École Primaire".to_string(),
        delegation: "Testour".to_string(),
        region: "Béja".to_string(),
        teachers: None,
        students: None,
        advisors: None,
    }
}

/// Snapshot with explicit headcounts; advisors are always fully present.
pub(super) fn snapshot(
    teachers_total: u32,
    teachers_present: u32,
    students_total: u32,
    students_present: u32,
) -> AttendanceSnapshot {
    AttendanceSnapshot::from_headcounts(
        SchoolId::new("1042"),
        observed_on(),
        Headcount::from_present(teachers_total, teachers_present),
        Headcount::from_present(students_total, students_present),
        Headcount::from_present(2, 2),
    )
}

pub(super) fn severities(alerts: &[Alert]) -> Vec<AlertSeverity> {
    alerts.iter().map(|alert| alert.severity).collect()
}

/// Replays queued draws; an exhausted queue falls back to the range minimum.
#[derive(Debug, Default)]
pub(super) struct ScriptedRandom {
    counts: VecDeque<u32>,
    rates: VecDeque<f64>,
}

impl ScriptedRandom {
    pub(super) fn new(counts: &[u32], rates: &[f64]) -> Self {
        Self {
            counts: counts.iter().copied().collect(),
            rates: rates.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn count_in(&mut self, range: CountRange) -> u32 {
        self.counts.pop_front().unwrap_or(range.min)
    }

    fn rate_in(&mut self, range: RateRange) -> f64 {
        self.rates.pop_front().unwrap_or(range.min)
    }
}

pub(super) fn scripted_estimator(counts: &[u32], rates: &[f64]) -> Arc<AttendanceEstimator> {
    Arc::new(
        AttendanceEstimator::new(ScriptedRandom::new(counts, rates))
            .with_observed_on(observed_on()),
    )
}

pub(super) fn remote_report() -> NarrativeReport {
    NarrativeReport {
        summary: "Rapport régional".to_string(),
        statistics: vec!["Enseignants : 44 présents sur 50".to_string()],
        trends: vec!["Stable".to_string()],
        insights: vec!["Suivi recommandé".to_string()],
        alerts: Vec::new(),
        sources: vec!["CRE Tunis 1".to_string()],
    }
}

#[derive(Debug, Clone)]
pub(super) enum Scripted {
    Report(NarrativeReport),
    Status(u16),
}

/// Provider returning a fixed outcome and remembering the bearer tokens it saw.
#[derive(Debug)]
pub(super) struct ScriptedProvider {
    outcome: Scripted,
    tokens: Mutex<Vec<Option<String>>>,
}

impl ScriptedProvider {
    pub(super) fn new(outcome: Scripted) -> Self {
        Self {
            outcome,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().expect("token mutex poisoned").clone()
    }
}

impl InsightProvider for ScriptedProvider {
    async fn request(
        &self,
        request: InsightRequest<'_>,
    ) -> Result<NarrativeReport, InsightUnavailable> {
        self.tokens
            .lock()
            .expect("token mutex poisoned")
            .push(request.bearer_token.map(str::to_string));

        match &self.outcome {
            Scripted::Report(report) => Ok(report.clone()),
            Scripted::Status(code) => Err(InsightUnavailable::Status(*code)),
        }
    }
}

pub(super) fn build_service(
    estimator: Arc<AttendanceEstimator>,
    outcome: Scripted,
) -> (SchoolInsightService<ScriptedProvider>, Arc<ScriptedProvider>) {
    let provider = Arc::new(ScriptedProvider::new(outcome));
    let service = SchoolInsightService::new(
        estimator,
        AlertThresholds::default(),
        provider.clone(),
        Locale::French,
    );
    (service, provider)
}

pub(super) fn router_with_service(
    service: SchoolInsightService<ScriptedProvider>,
) -> axum::Router {
    insight_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
