//! Wiring: builds the provider, handlers and router from configuration and
//! serves them until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::info;

use crate::adapters::ai::{GeminiConfig, GeminiProvider, MockAIProvider};
use crate::adapters::http::{api_router, with_layers, AnalysisAppState, DashboardAppState};
use crate::adapters::monitoring::{HealthMonitor, HealthMonitorConfig};
use crate::application::{
    DashboardStore, GenerateReportHandler, ReportMode, ReportSettings, SubmitAnalysisHandler,
};
use crate::config::{AiConfig, AppConfig};
use crate::ports::{AIError, AIProvider, ProviderInfo};

/// Builds the configured AI provider.
///
/// Offline mode gets an inert mock; it is never called because the report
/// handler runs in [`ReportMode::Offline`].
pub fn build_provider(ai: &AiConfig) -> Result<Arc<dyn AIProvider>, AIError> {
    if ai.is_offline() {
        return Ok(Arc::new(MockAIProvider::new().with_provider_info(
            ProviderInfo::new("offline", "offline", "Offline demo"),
        )));
    }

    let api_key = ai
        .gemini_api_key
        .as_ref()
        .map(|k| k.expose_secret().clone())
        .ok_or(AIError::AuthenticationFailed)?;

    let config = GeminiConfig::new(api_key)
        .with_model(&ai.model)
        .with_base_url(&ai.base_url)
        .with_timeout(ai.timeout());

    Ok(Arc::new(GeminiProvider::new(config)?))
}

/// Report tuning derived from the AI section.
pub fn report_settings(ai: &AiConfig) -> ReportSettings {
    ReportSettings {
        mode: if ai.is_offline() {
            ReportMode::Offline
        } else {
            ReportMode::Live
        },
        timeout: ai.timeout(),
        max_output_tokens: ai.max_output_tokens,
        temperature: ai.temperature,
    }
}

/// Builds the full router, middleware included.
pub fn build_router(
    config: &AppConfig,
    provider: Arc<dyn AIProvider>,
    store: DashboardStore,
) -> Router {
    let report_handler: Arc<GenerateReportHandler<dyn AIProvider>> = Arc::new(
        GenerateReportHandler::new(provider, report_settings(&config.ai)),
    );
    let submit_handler = Arc::new(SubmitAnalysisHandler::new(
        store.clone(),
        report_handler.clone(),
    ));

    let analysis = AnalysisAppState::new(report_handler)
        .with_simulated_latency(config.features.simulate_latency);
    let dashboard = DashboardAppState::new(store, submit_handler);

    with_layers(api_router(analysis, dashboard), &config.server)
}

/// Serves the API until Ctrl-C, then stops the health monitor.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let provider = build_provider(&config.ai).context("failed to build AI provider")?;
    let info = provider.provider_info();
    let store = DashboardStore::new(info.model.clone());

    let monitor = (config.features.enable_status_monitor && !config.ai.is_offline()).then(|| {
        HealthMonitor::new(
            provider.clone(),
            store.clone(),
            HealthMonitorConfig::default().with_interval(config.ai.status_interval()),
        )
        .spawn()
    });

    let app = build_router(&config, provider, store);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, provider = %info.name, model = %info.model, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(monitor) = monitor {
        monitor.stop().await;
    }
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
