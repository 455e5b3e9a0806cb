//! Rendering pipeline: pure paint commands and their terminal rasterizer.
//!
//! The geometry side of the pipeline never touches the terminal. A clock
//! face is described as a list of [`PaintCommand`]s in pixel space; the
//! terminal backend rasterizes those commands onto a character-cell grid
//! and presents the grid with crossterm. This keeps every per-frame
//! computation pure and testable, with I/O confined to
//! [`terminal::TerminalSurface`].

pub mod terminal;

use crate::constants::{HOUR_HAND_FRACTION, MINUTE_HAND_FRACTION, SECOND_HAND_FRACTION};
use crate::geometry::{FaceGeometry, MarkerShape, WallClockSample, hand_angles, hour_marker};
use crate::theme::{Rgb, ThemePalette};

/// A position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One drawing primitive in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Filled circle.
    Disc {
        center: Point,
        radius: f64,
        color: Rgb,
    },
    /// Circle outline.
    Circle {
        center: Point,
        radius: f64,
        color: Rgb,
    },
    /// Straight line segment.
    Line { from: Point, to: Point, color: Rgb },
    /// Text centered horizontally on `at`.
    Text { at: Point, text: String, color: Rgb },
}

impl PaintCommand {
    /// The same command translated by (dx, dy).
    pub fn offset(&self, dx: f64, dy: f64) -> PaintCommand {
        let shift = |p: &Point| Point::new(p.x + dx, p.y + dy);
        match self {
            PaintCommand::Disc {
                center,
                radius,
                color,
            } => PaintCommand::Disc {
                center: shift(center),
                radius: *radius,
                color: *color,
            },
            PaintCommand::Circle {
                center,
                radius,
                color,
            } => PaintCommand::Circle {
                center: shift(center),
                radius: *radius,
                color: *color,
            },
            PaintCommand::Line { from, to, color } => PaintCommand::Line {
                from: shift(from),
                to: shift(to),
                color: *color,
            },
            PaintCommand::Text { at, text, color } => PaintCommand::Text {
                at: shift(at),
                text: text.clone(),
                color: *color,
            },
        }
    }
}

/// Paint one analog clock face as a command list.
///
/// Command order matters to the rasterizer: face background first, then
/// border, markers, hour/minute/second hands, and the center dot last so
/// it sits on top of the hands.
pub fn paint_clock_face(
    sample: &WallClockSample,
    geometry: &FaceGeometry,
    palette: &ThemePalette,
) -> Vec<PaintCommand> {
    let center = Point::new(geometry.center_x, geometry.center_y);
    let mut commands = Vec::with_capacity(18);

    commands.push(PaintCommand::Disc {
        center,
        radius: geometry.radius,
        color: palette.face_background,
    });
    commands.push(PaintCommand::Circle {
        center,
        radius: geometry.radius,
        color: palette.face_border,
    });

    for index in 0..12 {
        match hour_marker(index, geometry) {
            MarkerShape::Numeral { x, y, text } => commands.push(PaintCommand::Text {
                at: Point::new(x, y),
                text: text.to_string(),
                color: palette.hour_markers,
            }),
            MarkerShape::Tick { from, to } => commands.push(PaintCommand::Line {
                from: Point::new(from.0, from.1),
                to: Point::new(to.0, to.1),
                color: palette.hour_markers,
            }),
        }
    }

    let angles = hand_angles(sample);
    let hand = |angle: f64, fraction: f64, color: Rgb| {
        let (x, y) = geometry.hand_endpoint(angle, fraction);
        PaintCommand::Line {
            from: center,
            to: Point::new(x, y),
            color,
        }
    };
    commands.push(hand(angles.hour, HOUR_HAND_FRACTION, palette.hour_hand));
    commands.push(hand(angles.minute, MINUTE_HAND_FRACTION, palette.minute_hand));
    commands.push(hand(angles.second, SECOND_HAND_FRACTION, palette.second_hand));

    commands.push(PaintCommand::Disc {
        center,
        radius: geometry.center_dot_radius(),
        color: palette.center_dot,
    });

    commands
}
