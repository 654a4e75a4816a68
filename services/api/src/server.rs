use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySnapshotProvider};
use crate::routes::with_dispatch_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dispatch_ai::config::AppConfig;
use dispatch_ai::error::AppError;
use dispatch_ai::telemetry;
use dispatch_ai::workflows::dispatch::{roster, DispatchService};
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

    let mut provider = InMemorySnapshotProvider::with_demo_data();
    if let Some(path) = args.technicians_csv.take() {
        provider.replace_technicians(roster::technicians_from_path(path)?);
    }
    if let Some(path) = args.vendors_csv.take() {
        provider.replace_vendors(roster::vendors_from_path(path)?);
    }

    let dispatch_service = Arc::new(DispatchService::new(
        Arc::new(provider),
        config.dispatch.engine_config(),
    ));

    let app = with_dispatch_routes(dispatch_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "dispatch recommendation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
