use liuyao::{api, config, init_tracing};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let service_config = match config::ServiceConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Err(e) = api::run(service_config).await {
        tracing::error!(error = %e, "Service failed");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}
