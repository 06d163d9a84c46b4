//! Solar event computation — sunrise and sunset instants for a date and
//! location.
//!
//! Implements the NOAA low-accuracy solar position algorithm: fractional
//! year → equation of time and solar declination (Fourier expansions) →
//! hour angle at the standard refraction-corrected zenith of 90.833°.
//! Accuracy is on the order of a minute, which is plenty for driving a
//! door that tolerates a configurable offset anyway.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Zenith angle of the sun centre at sunrise/sunset, refraction included.
const SUNRISE_SUNSET_ZENITH_DEG: f64 = 90.833;

/// Base astronomical event of a sun-based condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarEvent {
    Sunrise,
    Sunset,
}

/// Compute the UTC instant of `event` on `date` at the given coordinates.
///
/// `latitude` is degrees north, `longitude` degrees east. Inside polar day
/// or polar night the hour angle degenerates; the result is clamped to the
/// solar-noon (sunrise) or solar-midnight (sunset) side so the value stays
/// a usable, stable threshold instead of a panic.
#[must_use]
pub fn event_time(date: NaiveDate, latitude: f64, longitude: f64, event: SolarEvent) -> DateTime<Utc> {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };

    // Fractional year in radians, evaluated at local solar noon.
    let gamma = 2.0 * std::f64::consts::PI / days_in_year * (f64::from(date.ordinal()) - 1.0);

    // Equation of time, minutes.
    let eqtime = 229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin());

    // Solar declination, radians.
    let decl = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin();

    let lat_rad = latitude.to_radians();
    let zenith_rad = SUNRISE_SUNSET_ZENITH_DEG.to_radians();

    // cos of the hour angle; outside [-1, 1] the sun never crosses the
    // zenith on this date (polar day/night).
    let cos_ha = (zenith_rad.cos() / (lat_rad.cos() * decl.cos())) - lat_rad.tan() * decl.tan();
    let ha_deg = cos_ha.clamp(-1.0, 1.0).acos().to_degrees();

    let minutes_from_midnight = match event {
        SolarEvent::Sunrise => 720.0 - 4.0 * (longitude + ha_deg) - eqtime,
        SolarEvent::Sunset => 720.0 - 4.0 * (longitude - ha_deg) - eqtime,
    };

    #[allow(clippy::cast_possible_truncation)]
    let seconds = (minutes_from_midnight * 60.0).round() as i64;

    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    midnight + TimeDelta::seconds(seconds)
}
