use crate::config::model::RotatorConfig;
use crate::feed::api::{APIError, FeedAPI};
use crate::feed::dto::EventRecord;
use crate::feed::model::EventView;
use crate::feed::query::build_query_url;
use crate::pipeline;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// How long each event stays on screen before rotating to the next one
pub const ROTATION_INTERVAL: Duration = Duration::from_millis(8000);

/// Presents the views, in the order they are given
pub trait Renderer {
    fn render(&mut self, views: &[EventView]);
}

/// Writes each view to the log
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, views: &[EventView]) {
        if views.is_empty() {
            warn!("No events to display");
            return;
        }

        info!(
            "Rotating {} events every {}s ({}s per cycle)",
            views.len(),
            ROTATION_INTERVAL.as_secs(),
            rotation_cycle(views.len()).as_secs()
        );

        for (position, view) in views.iter().enumerate() {
            info!("Event {}/{}: {}", position + 1, views.len(), view);
        }
    }
}

/// Total time needed to show every view once
pub fn rotation_cycle(view_count: usize) -> Duration {
    ROTATION_INTERVAL * u32::try_from(view_count).unwrap_or(u32::MAX)
}

/// Prints each view as a JSON line
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&mut self, views: &[EventView]) {
        for view in views {
            match serde_json::to_string(view) {
                Ok(line) => println!("{}", line),
                Err(err) => warn!("Failed to serialize event view: {}", err),
            }
        }
    }
}

#[derive(Debug)]
pub struct EventRotator {
    config: RotatorConfig,
}

impl EventRotator {
    pub fn new(config: RotatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    pub fn request_url(&self) -> String {
        build_query_url(&self.config.url, &self.config.query)
    }

    /**
       Fetches the feed and renders its eligible events.
       Returns how many views were rendered. When the fetch fails nothing is rendered.
    */
    #[instrument(skip(self, renderer), fields(url = %self.config.url))]
    pub async fn refresh<R: Renderer>(&self, renderer: &mut R) -> Result<usize, APIError> {
        let batch = FeedAPI::get_events(&self.request_url()).await?;

        Ok(self.render_batch(&batch, renderer))
    }

    pub fn render_batch<R: Renderer>(&self, batch: &[EventRecord], renderer: &mut R) -> usize {
        let views = pipeline::run(batch, Some(&*self.config.filter));

        renderer.render(&views);

        views.len()
    }
}
