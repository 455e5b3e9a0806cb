//! Dashboard composition: one tick in, one frame of paint commands out.
//!
//! A single tick source samples the wall clock once and derives everything
//! the frame needs (per-timezone samples, the day's calendar facts, and
//! the April Fools flip) into a [`TickSnapshot`]. `compose` then turns a
//! snapshot plus a palette and the latest feed report into pixel-space
//! paint commands. Both steps are pure, so the whole frame pipeline is
//! testable without a terminal.
//!
//! Clock columns follow the original dashboard convention: UTC is always
//! shown, MET (UTC+1, no summer time) only while summer time is in
//! effect, and the rightmost clock is labeled "CET" in summer and
//! "MET / CET" in winter when the two coincide.

use chrono::{DateTime, Datelike, Locale, NaiveDate, Utc};
use chrono_tz::Etc::GMTMinus1;
use chrono_tz::Europe::Amsterdam;

use crate::calendar::{CalendarFact, DayFactCache};
use crate::geometry::{FaceGeometry, FaceSize, WallClockSample};
use crate::mascot;
use crate::render::{PaintCommand, Point, paint_clock_face};
use crate::theme::ThemePalette;

// Vertical layout bands, in pixels
const TITLE_BAND: f64 = 32.0;
const DIGITAL_BAND: f64 = 32.0;
const INFO_BAND: f64 = 32.0;
const MESSAGE_BAND: f64 = 32.0;
const COLUMN_GAP: f64 = 40.0;

/// Presentation switches resolved from config and CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub face: FaceSize,
    pub show_flags: bool,
    pub creature_mode: bool,
}

/// Everything derived from one reading of the wall clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSnapshot {
    pub utc: WallClockSample,
    pub met: WallClockSample,
    pub cet: WallClockSample,
    /// Civil date in the Netherlands, driving calendar facts and display.
    pub local_date: NaiveDate,
    pub local_hour: u32,
    pub fact: CalendarFact,
    /// April 1 prank windows render the dashboard upside down.
    pub flipped: bool,
}

/// Derive the tick snapshot for an instant.
pub fn observe(now: DateTime<Utc>, cache: &mut DayFactCache) -> TickSnapshot {
    let local = now.with_timezone(&Amsterdam);
    let local_date = local.date_naive();
    let local_hour = WallClockSample::from_time(&local.time()).hour;

    TickSnapshot {
        utc: WallClockSample::from_time(&now.time()),
        met: WallClockSample::from_time(&now.with_timezone(&GMTMinus1).time()),
        cet: WallClockSample::from_time(&local.time()),
        local_date,
        local_hour,
        fact: cache.fact_for(local_date),
        flipped: is_flip_window(local_date, local_hour),
    }
}

/// April 1, during 01:00-02:00, 06:00-07:00 and 15:00-16:00.
fn is_flip_window(date: NaiveDate, hour: u32) -> bool {
    date.month() == 4 && date.day() == 1 && matches!(hour, 1 | 6 | 15)
}

/// Format a sample as the 24-hour digital display.
pub fn format_hhmm(sample: &WallClockSample) -> String {
    format!("{:02}:{:02}", sample.hour, sample.minute)
}

/// Parse an `HH:mm` display string back into (hour, minute).
///
/// The digital display is intentionally lossy past the minute; this is
/// the inverse of [`format_hhmm`] for what it does carry.
pub fn parse_hhmm(text: &str) -> Option<(u32, u32)> {
    let (hour, minute) = text.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

/// The date in Dutch convention, e.g. "21 juni 2024".
pub fn dutch_date(date: NaiveDate) -> String {
    date.format_localized("%-d %B %Y", Locale::nl_NL).to_string()
}

/// A finished frame in pixel space.
#[derive(Debug, Clone)]
pub struct Frame {
    pub commands: Vec<PaintCommand>,
    pub width: f64,
    pub height: f64,
    pub flipped: bool,
}

struct ClockColumn {
    title: String,
    icon: Option<&'static str>,
    sample: WallClockSample,
}

/// Compose the full dashboard frame for one tick.
///
/// `feed` is the latest good moon/tide report; before the first successful
/// fetch the info row shows the date alone.
pub fn compose(
    snapshot: &TickSnapshot,
    palette: &ThemePalette,
    feed: Option<&crate::feed::MoonTideReport>,
    options: &DisplayOptions,
) -> Frame {
    let summer = snapshot.fact.summer_time;
    let columns = clock_columns(snapshot, options, summer);

    let face_px = options.face.side_px() as f64;
    let geometry = FaceGeometry::for_size(options.face);
    let width = COLUMN_GAP + columns.len() as f64 * (face_px + COLUMN_GAP);
    let height = TITLE_BAND + face_px + DIGITAL_BAND + INFO_BAND + MESSAGE_BAND;

    let mut commands = Vec::new();

    for (i, column) in columns.iter().enumerate() {
        let x0 = COLUMN_GAP + i as f64 * (face_px + COLUMN_GAP);
        let center_x = x0 + face_px / 2.0;

        let title = match column.icon {
            Some(icon) => format!("{} {}", column.title, icon),
            None => column.title.clone(),
        };
        commands.push(PaintCommand::Text {
            at: Point::new(center_x, TITLE_BAND / 2.0),
            text: title,
            color: palette.hour_markers,
        });

        for command in paint_clock_face(&column.sample, &geometry, palette) {
            commands.push(command.offset(x0, TITLE_BAND));
        }

        commands.push(PaintCommand::Text {
            at: Point::new(center_x, TITLE_BAND + face_px + DIGITAL_BAND / 2.0),
            text: format_hhmm(&column.sample),
            color: palette.hour_markers,
        });
    }

    commands.push(PaintCommand::Text {
        at: Point::new(width / 2.0, TITLE_BAND + face_px + DIGITAL_BAND + INFO_BAND / 2.0),
        text: info_line(snapshot, feed),
        color: palette.hour_markers,
    });

    if let Some(message) = message_line(&snapshot.fact) {
        commands.push(PaintCommand::Text {
            at: Point::new(
                width / 2.0,
                TITLE_BAND + face_px + DIGITAL_BAND + INFO_BAND + MESSAGE_BAND / 2.0,
            ),
            text: message.to_string(),
            color: palette.hour_hand,
        });
    }

    Frame {
        commands,
        width,
        height,
        flipped: snapshot.flipped,
    }
}

fn clock_columns(
    snapshot: &TickSnapshot,
    options: &DisplayOptions,
    summer: bool,
) -> Vec<ClockColumn> {
    let flag = |icon: &'static str| options.show_flags.then_some(icon);
    let met_icon = if options.creature_mode {
        Some(mascot::creature_for_hour(snapshot.local_date, snapshot.local_hour).glyph)
    } else {
        flag("🦭")
    };

    let mut columns = vec![ClockColumn {
        title: "UTC".to_string(),
        icon: flag("🇬🇧"),
        sample: snapshot.utc,
    }];

    if summer {
        columns.push(ClockColumn {
            title: "MET".to_string(),
            icon: met_icon,
            sample: snapshot.met,
        });
    }

    columns.push(ClockColumn {
        title: if summer { "CET" } else { "MET / CET" }.to_string(),
        icon: flag("🇳🇱"),
        sample: snapshot.cet,
    });

    columns
}

fn info_line(snapshot: &TickSnapshot, feed: Option<&crate::feed::MoonTideReport>) -> String {
    let date = dutch_date(snapshot.local_date);
    match feed {
        Some(report) => format!(
            "{}   {} {:.0}%   {}",
            report.tide.description, report.moon.symbol, report.moon.percentage, date
        ),
        None => date,
    }
}

/// Holiday names take precedence over the DST notice when both apply.
fn message_line(fact: &CalendarFact) -> Option<&'static str> {
    fact.holiday_name.or_else(|| fact.dst_message())
}
