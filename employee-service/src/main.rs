use employee_service::config::EmployeeConfig;
use employee_service::services::init_metrics;
use employee_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let config = EmployeeConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        &config.common.service_name,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    tracing::info!(
        service = %config.common.service_name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting employee service"
    );

    // Any startup failure, including an unreachable database, ends the process.
    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
