use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadStore, LoggingOutbox};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use creator_leads::config::AppConfig;
use creator_leads::error::AppError;
use creator_leads::intake::{HttpQualityScorer, LeadIntakeService};
use creator_leads::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let store = Arc::new(InMemoryLeadStore::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        leads: store.clone(),
    };

    let mut service =
        LeadIntakeService::new(store, Arc::new(LoggingOutbox::default()), config.intake.clone());
    if let Some(url) = config.scorer_url.clone() {
        let scorer = HttpQualityScorer::new(url);
        info!(endpoint = %scorer.endpoint(), "lead scoring enabled");
        service = service.with_scorer(Arc::new(scorer));
    }

    let app = with_lead_routes(Arc::new(service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        minimum_budget = config.intake.brand_minimum_budget,
        "lead intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
