use serde::{Deserialize, Serialize};

use crate::application::StatusSnapshot;
use crate::domain::{errors::TimelineError, timeline::Timeline};

/// One bucket as served: `{"time": "2024-01-01T00:00:00", "tweets": 5}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePointDto {
    pub time: String,
    pub tweets: u64,
}

/// Body of the status update endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayloadDto {
    #[serde(default)]
    pub display: String,
    pub timeline: Vec<TimePointDto>,
}

pub fn timeline_from_dto(points: &[TimePointDto], utc_offset_minutes: i32) -> Result<Timeline, TimelineError> {
    Timeline::parse(points.iter().map(|p| (p.time.as_str(), p.tweets)), utc_offset_minutes)
}

impl StatusPayloadDto {
    pub fn into_snapshot(self, utc_offset_minutes: i32) -> Result<StatusSnapshot, TimelineError> {
        let timeline = timeline_from_dto(&self.timeline, utc_offset_minutes)?;
        Ok(StatusSnapshot { display: self.display, timeline })
    }
}
