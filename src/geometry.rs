//! Clock face geometry: wall-clock samples, hand angles and marker layout.
//!
//! Everything in this module is pure arithmetic over a [`WallClockSample`]
//! and a [`FaceGeometry`]. No painting happens here; the renderer consumes
//! the angles and positions computed below and turns them into paint
//! commands. Angles follow the clock convention: 0 radians points at
//! 12 o'clock, i.e. the standard math angle shifted by −90°, increasing
//! clockwise around the dial.
//!
//! Hands never accumulate: every tick recomputes angles from the absolute
//! wall-clock fields, so there is no drift to correct for.

use chrono::Timelike;

use crate::constants::{
    CENTER_DOT_RADIUS, MARGIN_FROM_EDGE, MARKER_LENGTH, REFERENCE_RADIUS,
};

/// A single reading of the wall clock, taken fresh each tick.
///
/// Fields are already bounded by the clock itself (hour 0-23, minute and
/// second 0-59, millisecond 0-999), so angle computations need no modulo
/// handling beyond `hour % 12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClockSample {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl WallClockSample {
    /// Sample the time-of-day fields from any chrono time value.
    ///
    /// The millisecond field is not used for hand angles (the dashboard
    /// ticks at 1 Hz, so the second hand sweeps discretely) but the
    /// scheduler uses it to align ticks to second boundaries.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            // nanosecond() reports leap seconds as values >= 1_000_000_000
            millisecond: (time.nanosecond() / 1_000_000).min(999),
        }
    }
}

/// Hand angles in radians, 0 = 12 o'clock, clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngleSet {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

/// Compute the three hand angles for a wall-clock sample.
///
/// - hour hand: 30° per hour, advanced smoothly by the minute fraction
/// - minute hand: 6° per minute, advanced smoothly by the second fraction
/// - second hand: 6° per whole second; the repaint cadence is 1 Hz, so a
///   sub-second fractional term would never be observed
///
/// # Examples
/// ```
/// use klokr::geometry::{WallClockSample, hand_angles};
///
/// let noon = WallClockSample { hour: 12, minute: 0, second: 0, millisecond: 0 };
/// let angles = hand_angles(&noon);
/// assert!((angles.hour - (-90.0f64).to_radians()).abs() < 1e-12);
/// ```
pub fn hand_angles(sample: &WallClockSample) -> HandAngleSet {
    let hour = (sample.hour % 12) as f64 + sample.minute as f64 / 60.0;
    let minute = sample.minute as f64 + sample.second as f64 / 60.0;
    let second = sample.second as f64;

    HandAngleSet {
        hour: (hour * 30.0 - 90.0).to_radians(),
        minute: (minute * 6.0 - 90.0).to_radians(),
        second: (second * 6.0 - 90.0).to_radians(),
    }
}

/// Supported square face sizes, in pixels per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSize {
    Small,  // 200 px
    Medium, // 300 px
    Large,  // 400 px
}

impl FaceSize {
    /// Side length of the square drawing surface in pixels.
    pub fn side_px(self) -> u32 {
        match self {
            FaceSize::Small => 200,
            FaceSize::Medium => 300,
            FaceSize::Large => 400,
        }
    }

    /// Look up the preset for a configured pixel size.
    pub fn from_px(px: u32) -> Option<Self> {
        match px {
            200 => Some(FaceSize::Small),
            300 => Some(FaceSize::Medium),
            400 => Some(FaceSize::Large),
            _ => None,
        }
    }
}

/// Fixed layout metrics of one clock face, derived from its size preset.
///
/// Margins and marker lengths are defined at the 300px reference face and
/// scale linearly with the radius, so all presets look proportional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub margin_from_edge: f64,
    pub marker_length: f64,
}

impl FaceGeometry {
    pub fn for_size(size: FaceSize) -> Self {
        let radius = size.side_px() as f64 / 2.0;
        let scale = radius / REFERENCE_RADIUS;
        Self {
            radius,
            center_x: radius,
            center_y: radius,
            margin_from_edge: MARGIN_FROM_EDGE * scale,
            marker_length: MARKER_LENGTH * scale,
        }
    }

    /// Radius of the center dot, scaled from the reference face.
    pub fn center_dot_radius(&self) -> f64 {
        CENTER_DOT_RADIUS * self.radius / REFERENCE_RADIUS
    }

    /// Point at `distance` from the center along `angle`.
    pub fn point_at(&self, angle: f64, distance: f64) -> (f64, f64) {
        (
            self.center_x + distance * angle.cos(),
            self.center_y + distance * angle.sin(),
        )
    }

    /// Endpoint of a hand drawn at `angle` with the given length fraction.
    pub fn hand_endpoint(&self, angle: f64, fraction: f64) -> (f64, f64) {
        self.point_at(angle, self.radius * fraction)
    }
}

/// Layout of one of the twelve hour markers around the dial.
///
/// Every third index (12, 3, 6 and 9 o'clock) carries a numeral; the
/// remaining eight are short radial tick marks.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerShape {
    Numeral {
        x: f64,
        y: f64,
        text: &'static str,
    },
    Tick {
        from: (f64, f64),
        to: (f64, f64),
    },
}

/// Compute the position of hour marker `index` (0 = 12 o'clock, clockwise).
///
/// Numerals sit at `radius − margin` from the center; ticks span from
/// `radius − margin` inward by the marker length. Index 0 renders as "12",
/// never "0".
pub fn hour_marker(index: usize, geometry: &FaceGeometry) -> MarkerShape {
    debug_assert!(index < 12, "hour marker index out of range: {}", index);

    let angle = (index as f64 * 30.0 - 90.0).to_radians();
    let outer = geometry.radius - geometry.margin_from_edge;

    if index % 3 == 0 {
        let (x, y) = geometry.point_at(angle, outer);
        let text = match index {
            0 => "12",
            3 => "3",
            6 => "6",
            _ => "9",
        };
        MarkerShape::Numeral { x, y, text }
    } else {
        MarkerShape::Tick {
            from: geometry.point_at(angle, outer),
            to: geometry.point_at(angle, outer - geometry.marker_length),
        }
    }
}
