use super::dto::EventRecord;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use std::fmt::{self, Display};
use tracing::{error, info};

const MAX_RETRIES: u32 = 5;

lazy_static! {
    static ref REST_CLIENT: ClientWithMiddleware = ClientBuilder::new(Client::new())
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES)
        ))
        .build();
    static ref JSONP_WRAPPER: Regex =
        Regex::new(r"(?s)^\s*[\w$.]+\s*\((.*)\)\s*;?\s*$").unwrap();
}

pub struct FeedAPI;

impl FeedAPI {
    /**
    Returns the events of the feed, in the order they were sent
    * request_url: feed endpoint with the query already applied
    */
    #[tracing::instrument]
    pub async fn get_events(request_url: &str) -> Result<Vec<EventRecord>, APIError> {
        info!("Getting events");

        let response = REST_CLIENT
            .get(request_url)
            .send()
            .await
            .map_err(APIError::Request)?;

        let status = response.status();

        if !status.is_success() {
            error!("Feed answered with {}", status);
            return Err(APIError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| APIError::Request(err.into()))?;

        let events = parse_batch(&body)?;

        info!("Got {} events", events.len());

        Ok(events)
    }
}

/// Parses a feed body, which must be a JSON array (optionally wrapped as JSONP)
pub fn parse_batch(body: &str) -> Result<Vec<EventRecord>, APIError> {
    let json = JSONP_WRAPPER
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map_or(body, |payload| payload.as_str());

    serde_json::from_str::<Vec<EventRecord>>(json).map_err(|e| {
        error!("Response parse failed: {:?}", e);
        APIError::InvalidResponse
    })
}

#[derive(Debug)]
pub enum APIError {
    Request(reqwest_middleware::Error),
    Status(StatusCode),
    InvalidResponse,
}

impl Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            APIError::Request(err) => write!(f, "feed request failed: {}", err),
            APIError::Status(status) => write!(f, "feed answered with {}", status),
            APIError::InvalidResponse => write!(f, "feed response is not a list of events"),
        }
    }
}

impl std::error::Error for APIError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            APIError::Request(err) => Some(err),
            _ => None,
        }
    }
}
