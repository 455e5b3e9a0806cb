//! # Klokr
//!
//! A multi-timezone analog/digital clock dashboard for the terminal.
//!
//! Klokr paints UTC, MET and CET clock faces once per second, annotated
//! with the Dutch date, Dutch holiday names, daylight-saving transition
//! notices and the current moon/tide phase from the Rijkswaterstaat feed.
//! The day/night theme follows the sun at the configured coordinates.
//!
//! ## Architecture
//!
//! - **args**: Command-line parsing and presentation overrides
//! - **calendar**: Holiday names and DST transition detection, memoized per day
//! - **config**: Configuration loading, validation, and default generation
//! - **constants**: Application-wide constants and defaults
//! - **dashboard**: Tick snapshots and frame composition
//! - **feed**: Moon/tide feed client with hourly polling and retry
//! - **geometry**: Wall-clock samples, hand angles and marker layout
//! - **logger**: Structured logging with visual formatting
//! - **mascot**: The hourly sea-creature rotation
//! - **render**: Paint commands and the terminal rasterizer
//! - **solar**: Sunrise/sunset calculations driving the theme
//! - **theme**: The light and dark color palettes

pub mod args;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod feed;
pub mod geometry;
pub mod logger;
pub mod mascot;
pub mod render;
pub mod solar;
pub mod theme;

// Re-export important types for easier access
pub use config::Config;
pub use dashboard::{DisplayOptions, TickSnapshot, compose, observe};
pub use geometry::{FaceGeometry, FaceSize, HandAngleSet, WallClockSample, hand_angles};
pub use logger::{Log, LogLevel};
pub use theme::{ThemePalette, theme_colors};
