use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_insight_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use workforce_insights::config::AppConfig;
use workforce_insights::error::AppError;
use workforce_insights::insights::InsightService;
use workforce_insights::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let insights = Arc::new(InsightService::from_config(&config)?);
    let status = insights.source_status();

    let app = with_insight_routes(insights)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        live_jobs = !config.sources.jsearch.uses_fallback(),
        onet_credentials = status.has_onet_api_user && status.has_onet_api_pass,
        "workforce insights service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
