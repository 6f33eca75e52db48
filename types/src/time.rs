//! Timestamp type used throughout the election core.
//!
//! Timestamps are Unix epoch seconds (UTC). The ledger assigns them per
//! transaction; callers only ever supply them as text in
//! [`TIMESTAMP_FORMAT`] when configuring the election windows.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ParseTimestampError;

/// Textual form accepted by `configure` and produced by every view.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A Unix timestamp in seconds since epoch (UTC).
///
/// Serializes as text in human-readable formats (JSON, TOML) and as a bare
/// `u64` in binary formats (bincode), so ledger entries stay compact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Parse `YYYY-MM-DD HH:MM:SS` (UTC).
    ///
    /// Only the canonical form is accepted: every field zero-padded and no
    /// leap second, so the parsed value formats back to exactly `text`.
    pub fn parse(text: &str) -> Result<Self, ParseTimestampError> {
        let format_error = || ParseTimestampError::Format {
            input: text.to_string(),
        };
        let naive =
            NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| format_error())?;
        if naive.format(TIMESTAMP_FORMAT).to_string() != text {
            return Err(format_error());
        }
        let secs = naive.and_utc().timestamp();
        u64::try_from(secs)
            .map(Self)
            .map_err(|_| ParseTimestampError::BeforeEpoch(text.to_string()))
    }

    /// Seconds remaining until this timestamp (zero once it has passed).
    pub fn remaining_from(&self, now: Timestamp) -> u64 {
        self.0.saturating_sub(now.0)
    }

    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    pub fn minus_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_sub(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let datetime = i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        match datetime {
            Some(dt) => write!(f, "{}", dt.format(TIMESTAMP_FORMAT)),
            // Beyond chrono's calendar range; fall back to raw seconds.
            None => write!(f, "{}s", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_u64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            Self::parse(&text).map_err(D::Error::custom)
        } else {
            u64::deserialize(deserializer).map(Self)
        }
    }
}
