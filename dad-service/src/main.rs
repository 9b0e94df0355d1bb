use dad_service::{config::DadConfig, services::init_metrics, startup::Application};
use service_core::error::AppError;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Missing MONGO fails here, before anything is bound
    let config = DadConfig::load()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        port = config.common.port,
        "Starting Dad API"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    shutdown_tracing();
    Ok(())
}
