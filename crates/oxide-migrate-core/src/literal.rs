//! Constant values used as column defaults and history command parameters.
//!
//! Each variant is rendered to SQL by a dedicated method on the dialect, so
//! the variant tag alone selects the formatting rule.

use std::fmt::{self, Write as _};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SRID applied to geography values created from well-known text.
pub const DEFAULT_GEOGRAPHY_SRID: i32 = 4326;

/// SRID applied to geometry values created from well-known text.
pub const DEFAULT_GEOMETRY_SRID: i32 = 0;

const TICKS_PER_SECOND: u64 = 10_000_000;
const TICKS_PER_MINUTE: u64 = TICKS_PER_SECOND * 60;
const TICKS_PER_HOUR: u64 = TICKS_PER_MINUTE * 60;
const TICKS_PER_DAY: u64 = TICKS_PER_HOUR * 24;

/// A constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    /// Boolean.
    Bool(bool),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Date and time without zone information.
    DateTime(NaiveDateTime),
    /// Date and time in UTC.
    UtcDateTime(DateTime<Utc>),
    /// Date and time with an explicit offset.
    DateTimeOffset(DateTime<FixedOffset>),
    /// GUID.
    Guid(Uuid),
    /// Text.
    String(String),
    /// Time interval.
    TimeSpan(#[serde(with = "timespan_micros")] TimeDelta),
    /// Geodetic spatial value.
    Geography(SpatialValue),
    /// Planar spatial value.
    Geometry(SpatialValue),
    /// Integer number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Exact decimal number, kept in its textual form.
    Decimal(String),
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for Literal {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Literal {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Uuid> for Literal {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Self::UtcDateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for Literal {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTimeOffset(value)
    }
}

impl From<TimeDelta> for Literal {
    fn from(value: TimeDelta) -> Self {
        Self::TimeSpan(value)
    }
}

/// A spatial value in well-known text with its spatial reference id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialValue {
    /// Spatial reference id.
    pub srid: i32,
    /// Well-known text, e.g. `POINT (6 7)`.
    pub wkt: String,
}

impl SpatialValue {
    /// Creates a geography value with the default SRID (4326).
    #[must_use]
    pub fn geography(wkt: impl Into<String>) -> Self {
        Self {
            srid: DEFAULT_GEOGRAPHY_SRID,
            wkt: wkt.into(),
        }
    }

    /// Creates a geometry value with the default SRID (0).
    #[must_use]
    pub fn geometry(wkt: impl Into<String>) -> Self {
        Self {
            srid: DEFAULT_GEOMETRY_SRID,
            wkt: wkt.into(),
        }
    }

    /// Overrides the spatial reference id.
    #[must_use]
    pub const fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }
}

impl fmt::Display for SpatialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SRID={};{}", self.srid, self.wkt)
    }
}

/// Formats an interval as `[-][d.]hh:mm:ss[.fffffff]`.
#[must_use]
pub fn format_timespan(span: TimeDelta) -> String {
    let ticks = span
        .num_nanoseconds()
        .map_or_else(|| span.num_microseconds().unwrap_or(i64::MAX).saturating_mul(10), |n| n / 100);

    let abs = ticks.unsigned_abs();
    let days = abs / TICKS_PER_DAY;
    let hours = (abs % TICKS_PER_DAY) / TICKS_PER_HOUR;
    let minutes = (abs % TICKS_PER_HOUR) / TICKS_PER_MINUTE;
    let seconds = (abs % TICKS_PER_MINUTE) / TICKS_PER_SECOND;
    let fraction = abs % TICKS_PER_SECOND;

    let mut out = String::new();
    if ticks < 0 {
        out.push('-');
    }
    if days > 0 {
        let _ = write!(out, "{days}.");
    }
    let _ = write!(out, "{hours:02}:{minutes:02}:{seconds:02}");
    if fraction > 0 {
        let _ = write!(out, ".{fraction:07}");
    }
    out
}

mod timespan_micros {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(span: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(span.num_microseconds().unwrap_or(i64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        i64::deserialize(deserializer).map(TimeDelta::microseconds)
    }
}
