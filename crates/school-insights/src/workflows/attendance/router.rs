use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use super::domain::{Locale, SchoolRecord};
use super::insight::InsightProvider;
use super::service::SchoolInsightService;

/// Router builder exposing the attendance and narrative endpoints.
pub fn insight_router<P>(service: Arc<SchoolInsightService<P>>) -> Router
where
    P: InsightProvider + 'static,
{
    Router::new()
        .route("/api/v1/schools/attendance", post(attendance_handler::<P>))
        .route("/api/v1/schools/insights", post(insights_handler::<P>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Deserialize)]
pub struct InsightRequestBody {
    pub school: SchoolRecord,
    #[serde(default)]
    pub locale: Option<Locale>,
}

pub(crate) async fn attendance_handler<P>(
    State(service): State<Arc<SchoolInsightService<P>>>,
    Query(query): Query<LocaleQuery>,
    Json(school): Json<SchoolRecord>,
) -> Response
where
    P: InsightProvider + 'static,
{
    let assessment = service.assess(&school, query.locale);
    (StatusCode::OK, Json(assessment)).into_response()
}

pub(crate) async fn insights_handler<P>(
    State(service): State<Arc<SchoolInsightService<P>>>,
    headers: HeaderMap,
    Json(body): Json<InsightRequestBody>,
) -> Response
where
    P: InsightProvider + 'static,
{
    let token = bearer_token(&headers);
    let report = service
        .report(&body.school, body.locale, token.as_deref())
        .await;
    (StatusCode::OK, Json(report)).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}
