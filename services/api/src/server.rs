use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_checklist_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use visa_checklist::config::AppConfig;
use visa_checklist::error::AppError;
use visa_checklist::telemetry;
use visa_checklist::workflows::visa::{ChecklistService, LocalChecklistBackend};

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

    let checklist_service = Arc::new(ChecklistService::new(
        Arc::new(LocalChecklistBackend::new()),
        config.eligibility,
    ));

    let app = with_checklist_routes(checklist_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        accept_other_consulate = config.eligibility.accept_other_consulate,
        "visa checklist service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
