use eventrotator::config::env_loader::{load_bool_config, load_config};
use eventrotator::rotator::{EventRotator, JsonRenderer, LogRenderer};
use eventrotator::tracing::setup_loki;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let loki = setup_loki().await;

    let config = load_config();
    let rotator = EventRotator::new(config);

    info!("Requesting {}", rotator.request_url());

    let result = if load_bool_config("OUTPUT_JSON", false) {
        rotator.refresh(&mut JsonRenderer).await
    } else {
        rotator.refresh(&mut LogRenderer).await
    };

    let exit_code = match result {
        Ok(count) => {
            info!("Displayed {} events", count);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Failed to refresh events: {}", err);
            ExitCode::FAILURE
        }
    };

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        let _ = handle.await;
    }

    exit_code
}
