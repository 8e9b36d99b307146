use anyhow::Context;
use manufind::api::{self, app_state::AppState};
use manufind::config::loader::ConfigLoader;
use manufind::observability::{
    AppMetrics, HealthCheckResult, ObservabilityState, create_observability_router, init_tracing,
};
use manufind::services::{
    CriteriaExtractor, SearchService, SearchServiceImpl, create_criteria_assist,
};
use manufind::storage::create_company_store;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config)?;

    let _log_guard = init_tracing(&config.app_name, &config.logging);
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let store = create_company_store(&config.store)?;
    info!(
        "Company store initialized (backend: {}, table: {})",
        config.store.backend, config.store.table
    );

    let assist = create_criteria_assist(&config.assist)?;
    match &assist {
        Some(_) => info!("Language-model assist enabled: {}", config.assist.model),
        None => info!("Language-model assist disabled, keyword extraction only"),
    }
    let extractor = CriteriaExtractor::new(assist, config.assist.min_query_chars);

    let metrics = Arc::new(AppMetrics::default());
    let search_service = SearchServiceImpl::new(store, extractor)
        .with_limits(config.search.default_limit, config.search.max_limit)
        .with_metrics(metrics.clone());

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics.clone(),
    ));

    let started = Instant::now();
    let status = search_service.test_connection().await;
    if status.ok {
        info!("Company store reachable: {}", status.message);
    } else {
        warn!(
            "Company store unreachable, searches will serve demo data: {}",
            status.message
        );
    }
    observability_state
        .add_health_check(HealthCheckResult {
            name: "company_store".to_string(),
            healthy: status.ok,
            message: status.message,
            latency_ms: started.elapsed().as_millis() as u64,
        })
        .await;

    let app_state = AppState::new(Box::new(search_service), metrics);
    let router = create_observability_router(observability_state).merge(api::create_router(app_state));
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
