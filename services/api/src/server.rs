use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_topic_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use decision_bridge::config::AppConfig;
use decision_bridge::error::AppError;
use decision_bridge::telemetry;
use decision_bridge::DecisionBridge;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let bridge = Arc::new(DecisionBridge::load(&config.content)?);
    let report = bridge.verify();
    if !report.is_clean() {
        warn!(
            issues = report.issues.len(),
            "serving topics with coverage issues; run `verify` for details"
        );
    }

    let app = with_topic_routes(bridge.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        topics = bridge.index().len(),
        "decision bridge ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
