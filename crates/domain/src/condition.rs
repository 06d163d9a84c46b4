//! Conditions — rules yielding today's opening and closing thresholds.
//!
//! A condition is pure with respect to the reference instant: it derives
//! the threshold from the reference's calendar day on every call and never
//! caches a value computed for a different day. Sun-based conditions must
//! recompute per call because sunrise and sunset shift daily.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::CoopError;
use crate::solar::{self, SolarEvent};
use crate::time::Timestamp;

/// Default coop latitude, used when configuration leaves it zero/unset.
pub const DEFAULT_LATITUDE: f64 = 43.6043;

/// Default coop longitude, used when configuration leaves it zero/unset.
pub const DEFAULT_LONGITUDE: f64 = 1.4437;

/// Condition flavour carried by wire and configuration payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionMode {
    TimeBased,
    SunBased,
}

/// Wire/config shape of a condition: a mode tag plus its parameter string.
///
/// `{mode: "time_based", value: "07:30"}` or
/// `{mode: "sun_based", value: "-00:30"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub mode: ConditionMode,
    pub value: String,
}

impl ConditionSpec {
    /// Resolve the spec into a [`Condition`].
    ///
    /// `base` is the astronomical event a sun-based condition anchors to;
    /// the slot the condition will serve determines it (opening → sunrise,
    /// closing → sunset). Time-based conditions ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::InvalidFormat`] when `value` cannot be parsed
    /// for the given mode.
    pub fn resolve(
        &self,
        base: SolarEvent,
        latitude: f64,
        longitude: f64,
    ) -> Result<Condition, CoopError> {
        match self.mode {
            ConditionMode::TimeBased => {
                TimeBasedCondition::parse(&self.value).map(Condition::TimeBased)
            }
            ConditionMode::SunBased => {
                SunBasedCondition::parse(&self.value, base, latitude, longitude)
                    .map(Condition::SunBased)
            }
        }
    }
}

/// A rule yielding the instant the coop door should open or close on a
/// given day.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Fixed wall-clock time of day, the same every day.
    TimeBased(TimeBasedCondition),
    /// Sunrise or sunset plus a signed offset, shifting daily.
    SunBased(SunBasedCondition),
}

impl Condition {
    /// Today's opening threshold, relative to `reference`'s calendar day.
    #[must_use]
    pub fn opening_time(&self, reference: Timestamp) -> Timestamp {
        self.threshold(reference.date_naive())
    }

    /// Today's closing threshold, relative to `reference`'s calendar day.
    #[must_use]
    pub fn closing_time(&self, reference: Timestamp) -> Timestamp {
        self.threshold(reference.date_naive())
    }

    fn threshold(&self, date: NaiveDate) -> Timestamp {
        match self {
            Self::TimeBased(condition) => condition.at(date),
            Self::SunBased(condition) => condition.at(date),
        }
    }
}

/// Fixed wall-clock condition, e.g. "every day at 07:30".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBasedCondition {
    time: NaiveTime,
}

impl TimeBasedCondition {
    /// Parse an `"HH:MM"` schedule string.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::InvalidFormat`] when the string is not a valid
    /// time of day.
    pub fn parse(value: &str) -> Result<Self, CoopError> {
        let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
            CoopError::InvalidFormat {
                what: "schedule",
                value: value.to_string(),
            }
        })?;
        Ok(Self { time })
    }

    fn at(self, date: NaiveDate) -> Timestamp {
        date.and_time(self.time).and_utc()
    }
}

/// Solar condition: a base event at the coop's coordinates plus an offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunBasedCondition {
    event: SolarEvent,
    offset: TimeDelta,
    latitude: f64,
    longitude: f64,
}

impl SunBasedCondition {
    /// Parse a signed `"[+|-]HH:MM"` offset string and anchor the condition
    /// to `event` at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::InvalidFormat`] when the offset is unparsable.
    pub fn parse(
        value: &str,
        event: SolarEvent,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, CoopError> {
        Ok(Self {
            event,
            offset: parse_offset(value)?,
            latitude,
            longitude,
        })
    }

    fn at(self, date: NaiveDate) -> Timestamp {
        solar::event_time(date, self.latitude, self.longitude, self.event) + self.offset
    }
}

/// Parse a signed duration such as `"-00:30"`, `"+00:15"` or `"01:00"`.
fn parse_offset(value: &str) -> Result<TimeDelta, CoopError> {
    let invalid = || CoopError::InvalidFormat {
        what: "offset",
        value: value.to_string(),
    };

    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if minutes.is_empty() || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i64 = hours.parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let total = TimeDelta::minutes(hours * 60 + minutes);
    Ok(if negative { -total } else { total })
}
