use crate::cli::ServeArgs;
use crate::infra::{insight_service, AppState};
use crate::routes::with_insight_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use school_insights::config::AppConfig;
use school_insights::error::AppError;
use school_insights::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(insight_service(&config, None, false)?);

    let app = with_insight_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        insight_endpoint = config.insight.endpoint.as_deref().unwrap_or("offline"),
        default_locale = config.estimator.default_locale.code(),
        "school insights service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
