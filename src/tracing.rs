use lazy_static::lazy_static;
use std::{env, io};
use tokio::task::JoinHandle;
use tracing::{info, warn, Level};
use tracing_loki::url::Url;
use tracing_loki::{BackgroundTask, BackgroundTaskController};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

const CRATE_TARGET: &str = "eventrotator";
const DEFAULT_LEVEL: Level = Level::TRACE;

lazy_static! {
    static ref LOKI_URL: Option<String> = env::var("LOKI_URL").ok();
    static ref LOKI_SERVICE: String =
        env::var("LOKI_SERVICE").unwrap_or_else(|_| CRATE_TARGET.to_string());
    static ref LOG_LEVEL: Option<String> = env::var("LOG_LEVEL").ok();
}

/// Level of the crate's own logs, `LOG_LEVEL` when it names one
fn crate_level(configured: Option<&str>) -> Result<Level, String> {
    match configured {
        None => Ok(DEFAULT_LEVEL),
        Some(level) => level
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a log level", level)),
    }
}

fn build_loki_layer(
    base_url: Url,
    service: &str,
) -> Result<
    (
        tracing_loki::Layer,
        BackgroundTaskController,
        BackgroundTask,
    ),
    tracing_loki::Error,
> {
    tracing_loki::builder()
        .label("service", service)?
        .build_controller_url(base_url)
}

/// Logs to stdout, and to Loki as well when `LOKI_URL` is set and reachable.
/// `LOKI_SERVICE` overrides the service label and `LOG_LEVEL` the crate's level.
pub async fn setup_loki() -> Option<(BackgroundTaskController, JoinHandle<()>)> {
    let level = crate_level(LOG_LEVEL.as_deref())
        .unwrap_or_else(|err| panic!("Invalid config 'LOG_LEVEL'. {}", err));

    let filter = filter::Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(Level::WARN);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout));

    let Some(base_url) = LOKI_URL.as_ref() else {
        registry.init();
        warn!("Loki URL not provided. Continuing without it.");
        return None;
    };

    let base_url: Url = match base_url.parse() {
        Ok(base_url) => base_url,
        Err(err) => {
            registry.init();
            warn!("Invalid Loki URL ({}). Continuing without it.", err);
            return None;
        }
    };

    if reqwest::get(base_url.clone()).await.is_err() {
        registry.init();
        warn!("Couldn't connect to Loki. Continuing without it.");
        return None;
    }

    match build_loki_layer(base_url, &LOKI_SERVICE) {
        Ok((layer, controller, task)) => {
            registry.with(layer).init();
            let handle = tokio::spawn(task);

            info!(service = %*LOKI_SERVICE, %level, "Loki initialized");

            Some((controller, handle))
        }
        Err(err) => {
            registry.init();
            warn!("Failed to build Loki layer ({}). Continuing without it.", err);
            None
        }
    }
}
