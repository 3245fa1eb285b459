use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Source timestamp, kept exactly as the upstream record provided it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Seconds since the Unix epoch (discussion posts).
    Epoch(f64),
    /// Publication string (preprint entries), possibly empty.
    Published(String),
}

impl Timestamp {
    /// Best-effort UTC view for display. Stored values are never rewritten.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Epoch(secs) => {
                if !secs.is_finite() {
                    return None;
                }
                let whole = secs.floor();
                // fractions just below 1 can round up to a full second
                let nanos = (((secs - whole) * 1_000_000_000.0) as u32).min(999_999_999);
                Utc.timestamp_opt(whole as i64, nanos).single()
            }
            Timestamp::Published(raw) => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// Display-only fields. Nothing in the corpus store reads these.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub timestamp: Option<Timestamp>,
    pub url: Option<String>,
}

impl DisplayMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.timestamp.is_none()
            && self.url.is_none()
    }
}
