use metrics_exporter_prometheus::PrometheusHandle;
use school_insights::config::AppConfig;
use school_insights::error::AppError;
use school_insights::workflows::attendance::{
    AttendanceEstimator, InsightBackend, Locale, OfflineInsightProvider, SchoolInsightService,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the estimator, thresholds and insight backend from configuration.
/// `seed` overrides the configured seed; `offline` skips the remote endpoint.
pub(crate) fn insight_service(
    config: &AppConfig,
    seed: Option<u64>,
    offline: bool,
) -> Result<SchoolInsightService<InsightBackend>, AppError> {
    let estimator = match seed.or(config.estimator.seed) {
        Some(seed) => AttendanceEstimator::seeded(seed),
        None => AttendanceEstimator::from_entropy(),
    };

    let backend = if offline {
        InsightBackend::Offline(OfflineInsightProvider)
    } else {
        InsightBackend::from_config(&config.insight)?
    };

    Ok(SchoolInsightService::new(
        Arc::new(estimator),
        config.thresholds,
        Arc::new(backend),
        config.estimator.default_locale,
    ))
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    if raw.trim().is_empty() {
        return Err("locale must not be empty (expected fr, ar or en)".to_string());
    }
    Ok(Locale::from_code(raw))
}
