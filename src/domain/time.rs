/// Domain abstraction for wall-clock time.
///
/// The browser implementation lives in `infrastructure::services`; tests
/// inject a fixed clock so "now" is deterministic.
pub trait TimeProvider {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Local offset east of UTC, in minutes.
    fn utc_offset_minutes(&self) -> i32 {
        0
    }

    fn format_timestamp(&self, timestamp: i64) -> String {
        let secs = timestamp.rem_euclid(86_400_000) / 1000;
        let millis = timestamp.rem_euclid(1000);
        format!("{:02}:{:02}:{:02}.{:03}", secs / 3600, (secs / 60) % 60, secs % 60, millis)
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeProvider {
    pub now_millis: i64,
    pub utc_offset_minutes: i32,
}

impl FixedTimeProvider {
    pub fn new(now_millis: i64) -> Self {
        Self { now_millis, utc_offset_minutes: 0 }
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now_millis(&self) -> i64 {
        self.now_millis
    }

    fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }
}
