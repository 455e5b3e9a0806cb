//! Solar position calculations driving the day/night theme.
//!
//! The dashboard is dark when the sun is below the horizon at the
//! configured coordinates. Sunrise and sunset instants come from the
//! `sunrise` crate; this module validates the coordinates, compares the
//! current instant against today's solar events, and folds in the optional
//! command-line theme override.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

/// How the palette is chosen: from the sun, or forced by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Day,
    Night,
}

impl ThemeMode {
    /// Parse a config/CLI theme value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ThemeMode::Auto),
            "day" => Some(ThemeMode::Day),
            "night" => Some(ThemeMode::Night),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Day => "day",
            ThemeMode::Night => "night",
        }
    }
}

/// Calculate sunrise and sunset instants for a location and date.
///
/// # Arguments
/// * `latitude` - Geographic latitude in degrees (-90 to +90)
/// * `longitude` - Geographic longitude in degrees (-180 to +180)
/// * `date` - Date for which to calculate sunrise/sunset
///
/// # Returns
/// * `Ok((sunrise, sunset))` - UTC instants of today's solar events
/// * `Err(_)` - If the coordinates are invalid
pub fn sunrise_sunset(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!(
            "Invalid latitude: {}. Must be between -90 and 90 degrees",
            latitude
        );
    }
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!(
            "Invalid longitude: {}. Must be between -180 and 180 degrees",
            longitude
        );
    }

    let coord = Coordinates::new(latitude, longitude)
        .ok_or_else(|| anyhow::anyhow!("Failed to create coordinates"))?;
    let solar_day = SolarDay::new(coord, date);

    let sunrise_utc = solar_day.event_time(SolarEvent::Sunrise);
    let sunset_utc = solar_day.event_time(SolarEvent::Sunset);

    Ok((sunrise_utc, sunset_utc))
}

/// Whether the sun is down at `now` for the given coordinates.
///
/// Dark means before today's sunrise or after today's sunset.
pub fn is_dark_at(now: DateTime<Utc>, latitude: f64, longitude: f64) -> Result<bool> {
    let (sunrise, sunset) = sunrise_sunset(latitude, longitude, now.date_naive())?;
    Ok(now < sunrise || now > sunset)
}

/// Resolve the dark-mode flag for a theme mode.
///
/// `Day` and `Night` are hard overrides; `Auto` consults the sun.
pub fn resolve_is_dark(
    mode: ThemeMode,
    now: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Result<bool> {
    match mode {
        ThemeMode::Day => Ok(false),
        ThemeMode::Night => Ok(true),
        ThemeMode::Auto => is_dark_at(now, latitude, longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const AMSTERDAM_LAT: f64 = 52.3676;
    const AMSTERDAM_LON: f64 = 4.9041;

    #[test]
    fn test_invalid_coordinates_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        assert!(sunrise_sunset(91.0, 0.0, date).is_err());
        assert!(sunrise_sunset(0.0, 181.0, date).is_err());
        assert!(sunrise_sunset(-91.0, 0.0, date).is_err());
    }

    #[test]
    fn test_sunrise_precedes_sunset() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let (sunrise, sunset) = sunrise_sunset(AMSTERDAM_LAT, AMSTERDAM_LON, date).unwrap();
        assert!(sunrise < sunset);
    }

    #[test]
    fn test_midsummer_noon_is_day() {
        let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        assert!(!is_dark_at(noon, AMSTERDAM_LAT, AMSTERDAM_LON).unwrap());
    }

    #[test]
    fn test_midwinter_midnight_is_night() {
        let midnight = Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap();
        assert!(is_dark_at(midnight, AMSTERDAM_LAT, AMSTERDAM_LON).unwrap());
    }

    #[test]
    fn test_theme_overrides_skip_solar_calculation() {
        let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        assert!(resolve_is_dark(ThemeMode::Night, noon, AMSTERDAM_LAT, AMSTERDAM_LON).unwrap());
        assert!(!resolve_is_dark(ThemeMode::Day, noon, AMSTERDAM_LAT, AMSTERDAM_LON).unwrap());
    }

    #[test]
    fn test_theme_mode_parsing() {
        assert_eq!(ThemeMode::parse("auto"), Some(ThemeMode::Auto));
        assert_eq!(ThemeMode::parse("day"), Some(ThemeMode::Day));
        assert_eq!(ThemeMode::parse("night"), Some(ThemeMode::Night));
        assert_eq!(ThemeMode::parse("dusk"), None);
    }
}
