use std::process::ExitCode;

use session_recorder::config::AppConfig;
use session_recorder::server;
use session_recorder::telemetry::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    // AppConfig::load also reads .env when present
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = init_tracing(&config.server) {
        eprintln!("Failed to initialize tracing: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Session recorder failed");
            ExitCode::FAILURE
        }
    }
}
