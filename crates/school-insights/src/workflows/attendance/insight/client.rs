use super::{InsightProvider, InsightRequest, InsightUnavailable};
use crate::workflows::attendance::domain::{AttendanceSnapshot, Locale, NarrativeReport, SchoolId};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the regional-insight endpoint.
#[derive(Debug, Clone)]
pub struct RegionalInsightClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RegionalInsightClient {
    /// `timeout` of `None` keeps the transport default.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, InsightUnavailable> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| InsightUnavailable::Transport(err.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl InsightProvider for RegionalInsightClient {
    async fn request(
        &self,
        request: InsightRequest<'_>,
    ) -> Result<NarrativeReport, InsightUnavailable> {
        let payload = InsightPayload::from_request(&request);

        let mut outbound = self.http.post(&self.endpoint).json(&payload);
        if let Some(token) = request.bearer_token {
            outbound = outbound.bearer_auth(token);
        }

        let response = outbound
            .send()
            .await
            .map_err(|err| InsightUnavailable::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightUnavailable::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| InsightUnavailable::Transport(err.to_string()))?;

        let report: NarrativeReport = serde_json::from_slice(&body)
            .map_err(|err| InsightUnavailable::Malformed(err.to_string()))?;

        debug!(
            school_id = %request.school.id,
            endpoint = %self.endpoint,
            alerts = report.alerts.len(),
            "regional insight received"
        );

        Ok(report)
    }
}

/// JSON body posted to the regional-insight endpoint.
#[derive(Debug, Serialize)]
pub struct InsightPayload<'a> {
    pub school_id: &'a SchoolId,
    pub school_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name_ar: Option<&'a str>,
    pub school_type: &'a str,
    pub delegation: &'a str,
    pub region: &'a str,
    pub locale: Locale,
    pub attendance_context: AttendanceContext,
}

impl<'a> InsightPayload<'a> {
    pub fn from_request(request: &InsightRequest<'a>) -> Self {
        let school = request.school;
        Self {
            school_id: &school.id,
            school_name: &school.name,
            school_name_ar: school.name_ar.as_deref(),
            school_type: &school.school_type,
            delegation: &school.delegation,
            region: &school.region,
            locale: request.locale,
            attendance_context: AttendanceContext::from_snapshot(request.snapshot, request.locale),
        }
    }
}

/// Snapshot figures as the remote service expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceContext {
    pub date: String,
    pub teachers_total: u32,
    pub teachers_present: u32,
    pub teachers_absent: u32,
    pub students_total: u32,
    pub students_present: u32,
    pub students_absent: u32,
    pub advisors_total: u32,
    pub advisors_present: u32,
    pub teacher_attendance_rate: f64,
    pub student_attendance_rate: f64,
    pub student_teacher_ratio: u32,
}

impl AttendanceContext {
    pub fn from_snapshot(snapshot: &AttendanceSnapshot, locale: Locale) -> Self {
        Self {
            date: snapshot.formatted_date(locale),
            teachers_total: snapshot.teachers_total,
            teachers_present: snapshot.teachers_present,
            teachers_absent: snapshot.teachers_absent,
            students_total: snapshot.students_total,
            students_present: snapshot.students_present,
            students_absent: snapshot.students_absent,
            advisors_total: snapshot.advisors_total,
            advisors_present: snapshot.advisors_present,
            teacher_attendance_rate: snapshot.teacher_attendance_rate,
            student_attendance_rate: snapshot.student_attendance_rate,
            student_teacher_ratio: snapshot.student_teacher_ratio(),
        }
    }
}
