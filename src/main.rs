//! Casegen service entry point.

use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use casegen::adapters::ai::{GeminiConfig, GeminiProvider};
use casegen::adapters::export::LocalExportService;
use casegen::adapters::http::{casegen_routes, CasegenHandlers};
use casegen::application::{ConvertExportHandler, GenerateCasesHandler, GenerateDiagramHandler};
use casegen::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.validate()?;

    let provider = Arc::new(GeminiProvider::new(GeminiConfig::from_app_config(&config.ai)));
    let exporter = Arc::new(LocalExportService::new(config.export.output_dir.clone()));

    let generate_handler = Arc::new(
        GenerateCasesHandler::new(provider.clone(), exporter.clone())
            .with_generation(config.ai.temperature, config.ai.max_output_tokens),
    );
    let convert_handler = Arc::new(ConvertExportHandler::new(exporter.clone()));
    let diagram_handler = Arc::new(GenerateDiagramHandler::new(provider, exporter));

    let handlers = CasegenHandlers::new(
        generate_handler,
        convert_handler,
        diagram_handler,
        config.export.output_dir.clone(),
        config.export.default_stem.clone(),
    );

    let app = casegen_routes(handlers)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, model = %config.ai.model, "casegen listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
