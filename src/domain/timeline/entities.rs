use serde::{Deserialize, Serialize};

use super::value_objects::Timestamp;
use crate::domain::errors::TimelineError;

/// Entity - one per-minute bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub time: Timestamp,
    pub tweets: u64,
}

impl TimePoint {
    pub fn new(time: Timestamp, tweets: u64) -> Self {
        Self { time, tweets }
    }
}

/// Aggregate - non-empty, strictly chronological sequence of buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    points: Vec<TimePoint>,
}

impl Timeline {
    pub fn new(points: Vec<TimePoint>) -> Result<Self, TimelineError> {
        if points.is_empty() {
            return Err(TimelineError::Empty);
        }
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].time <= pair[0].time)
        {
            return Err(TimelineError::OutOfOrder { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// Build from raw `(time, tweets)` pairs as served by the status endpoint.
    pub fn parse<'a, I>(raw: I, local_offset_minutes: i32) -> Result<Self, TimelineError>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let points = raw
            .into_iter()
            .enumerate()
            .map(|(index, (time, tweets))| {
                Timestamp::parse_iso(time, local_offset_minutes)
                    .map(|time| TimePoint::new(time, tweets))
                    .ok_or_else(|| TimelineError::InvalidTime { index, value: time.to_string() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points)
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &TimePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &TimePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn max_tweets(&self) -> u64 {
        self.points.iter().map(|p| p.tweets).max().unwrap_or(0)
    }

    /// Earliest and latest bucket time
    pub fn extent(&self) -> (Timestamp, Timestamp) {
        (self.first().time, self.last().time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_unordered() {
        assert_eq!(Timeline::new(vec![]), Err(TimelineError::Empty));
        let unordered = vec![
            TimePoint::new(Timestamp::from_millis(60_000), 1),
            TimePoint::new(Timestamp::from_millis(60_000), 2),
        ];
        assert_eq!(Timeline::new(unordered), Err(TimelineError::OutOfOrder { index: 1 }));
    }

    #[test]
    fn parse_reports_bad_bucket_index() {
        let raw = [("2024-01-01T00:00:00Z", 1), ("soon", 2)];
        let err = Timeline::parse(raw, 0).unwrap_err();
        assert_eq!(err, TimelineError::InvalidTime { index: 1, value: "soon".to_string() });
    }

    #[test]
    fn extent_and_max() {
        let raw = [("2024-01-01T00:00:00Z", 5), ("2024-01-01T00:01:00Z", 12)];
        let timeline = Timeline::parse(raw, 0).unwrap();
        assert_eq!(timeline.max_tweets(), 12);
        assert_eq!(timeline.extent().1.value() - timeline.extent().0.value(), 60_000);
    }
}
