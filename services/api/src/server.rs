use crate::cli::ServeArgs;
use crate::infra::{load_service, AppState, CaseApiState};
use crate::routes::case_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dca_engine::config::AppConfig;
use dca_engine::error::AppError;
use dca_engine::telemetry;
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

    let service = load_service(&config.engine)?;
    let model_loaded = service.has_model();
    let case_state = CaseApiState::new(service, config.engine.rank_limit);

    let app = case_router(case_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model_loaded,
        rank_limit = config.engine.rank_limit,
        "case prioritization service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
