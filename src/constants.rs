//! Application constants and default values for klokr.
//!
//! This module contains all the configuration defaults, validation limits,
//! and operational constants used throughout the application.

// ═══ Application Configuration Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_LATITUDE: f64 = 52.3676; // Amsterdam
pub const DEFAULT_LONGITUDE: f64 = 4.9041;
pub const DEFAULT_FACE_SIZE: u32 = 300; // pixels, side of the square face
pub const DEFAULT_THEME_MODE: &str = "auto"; // "auto", "day" or "night"
pub const DEFAULT_SHOW_FLAGS: bool = true;
pub const DEFAULT_CREATURE_MODE: bool = false;
pub const DEFAULT_FEED_URL: &str =
    "https://waterberichtgeving.rws.nl/dynamisch/hmc-api/maanfase.json";
pub const DEFAULT_FEED_POLL_MINUTE: u32 = 2; // fetch at minute 2 of every hour

// ═══ Validation Limits ═══
// These limits ensure user inputs are within reasonable and safe ranges

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;

// The renderer only ships geometry presets for these face sizes
pub const SUPPORTED_FACE_SIZES: &[u32] = &[200, 300, 400];

pub const MAXIMUM_FEED_POLL_MINUTE: u32 = 59;

// ═══ Clock Face Geometry Constants ═══
// All lengths are expressed at the 300px reference face (radius 150) and
// scaled linearly for the other presets.

pub const REFERENCE_RADIUS: f64 = 150.0;
pub const MARGIN_FROM_EDGE: f64 = 20.0; // markers and numerals share this margin
pub const MARKER_LENGTH: f64 = 20.0;
pub const CENTER_DOT_RADIUS: f64 = 6.0;

// Hand lengths as fractions of the face radius
pub const HOUR_HAND_FRACTION: f64 = 0.5;
pub const MINUTE_HAND_FRACTION: f64 = 0.7;
pub const SECOND_HAND_FRACTION: f64 = 0.8;

// ═══ Operational Timing Constants ═══
// Internal timing values for application operation

pub const TICK_INTERVAL_SECS: u64 = 1; // wall clock repaint cadence
pub const SOLAR_CHECK_INTERVAL_SECS: u64 = 60; // day/night re-evaluation cadence
pub const SLEEP_DETECTION_THRESHOLD_SECS: u64 = 300; // 5 minutes - detect system sleep/resume
pub const FEED_TIMEOUT_SECS: u64 = 30; // transport default for the moon/tide fetch

// ═══ Exit Codes ═══
// Standard exit codes for process termination

pub const EXIT_FAILURE: i32 = 1; // General failure

// ═══ Test Constants ═══
// Common values used in tests for consistency
#[cfg(test)]
pub mod test_constants {
    use super::*;

    pub const TEST_STANDARD_LATITUDE: f64 = DEFAULT_LATITUDE;
    pub const TEST_STANDARD_LONGITUDE: f64 = DEFAULT_LONGITUDE;
    pub const TEST_STANDARD_FACE_SIZE: u32 = DEFAULT_FACE_SIZE;
    pub const TEST_STANDARD_POLL_MINUTE: u32 = DEFAULT_FEED_POLL_MINUTE;
}
