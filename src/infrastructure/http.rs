use gloo::net::http::Request;

use super::dto::StatusPayloadDto;
use super::services::BrowserTimeProvider;
use crate::application::{StatusSnapshot, StatusSource};
use crate::domain::{
    errors::{AppResult, FetchFailure},
    logging::{LogComponent, get_logger},
    time::TimeProvider,
};

/// HTTP client for the status update endpoint
#[derive(Clone, Debug)]
pub struct StatusHttpClient {
    update_url: String,
    clock: BrowserTimeProvider,
}

impl StatusHttpClient {
    pub fn new(update_url: impl Into<String>) -> Self {
        Self { update_url: update_url.into(), clock: BrowserTimeProvider::new() }
    }

    /// GET the endpoint and decode its JSON body
    pub async fn get_payload(&self) -> Result<StatusPayloadDto, FetchFailure> {
        get_logger().debug(
            LogComponent::Infrastructure("StatusHttpClient"),
            &format!("🌐 GET: {}", self.update_url),
        );

        let response = Request::get(&self.update_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchFailure::Network(format!("{e:?}")))?;

        if !response.ok() {
            return Err(FetchFailure::HttpStatus {
                status: response.status(),
                text: response.status_text(),
            });
        }

        response
            .json::<StatusPayloadDto>()
            .await
            .map_err(|e| FetchFailure::Decode(format!("{e:?}")))
    }
}

impl StatusSource for StatusHttpClient {
    async fn fetch_status(&self) -> AppResult<StatusSnapshot> {
        let payload = self.get_payload().await?;
        let points = payload.timeline.len();
        let snapshot = payload.into_snapshot(self.clock.utc_offset_minutes())?;

        get_logger().debug(
            LogComponent::Infrastructure("StatusHttpClient"),
            &format!("✅ Received {points} buckets"),
        );
        Ok(snapshot)
    }

    fn endpoint(&self) -> &str {
        &self.update_url
    }
}

