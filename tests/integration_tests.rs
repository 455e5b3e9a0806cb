//! End-to-end tests over the config pipeline and the frame pipeline:
//! generated config files load back, invalid files are rejected, and a
//! composed frame rasterizes to a grid carrying the expected content.

use chrono::{TimeZone, Utc};
use serial_test::serial;

use klokr::calendar::DayFactCache;
use klokr::config::{Config, validate_config};
use klokr::dashboard::{self, DisplayOptions};
use klokr::feed::{FeedPoller, parse_report};
use klokr::geometry::FaceSize;
use klokr::render::terminal::CellGrid;
use klokr::theme;

fn options() -> DisplayOptions {
    DisplayOptions {
        face: FaceSize::Medium,
        show_flags: true,
        creature_mode: false,
    }
}

/// Grid text content as one string, for containment checks.
fn grid_text(grid: &CellGrid) -> String {
    let mut text = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            text.push(grid.char_at(col, row));
        }
        text.push('\n');
    }
    text
}

#[test]
#[serial]
fn test_default_config_creation_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("klokr.toml");

    Config::create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = Config::load_from_path(&path).unwrap();
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.latitude(), 52.3676);
    assert_eq!(config.longitude(), 4.9041);
    assert_eq!(config.face().side_px(), 300);
    assert_eq!(config.feed_poll_minute(), 2);
}

#[test]
#[serial]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("klokr.toml");

    std::fs::write(&path, "face_size = 250\n").unwrap();
    assert!(Config::load_from_path(&path).is_err());

    std::fs::write(&path, "theme = \"dusk\"\n").unwrap();
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
#[serial]
fn test_malformed_toml_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("klokr.toml");
    std::fs::write(&path, "latitude = [not toml").unwrap();
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn test_summer_frame_rasterizes_three_clocks() {
    let now = Utc.with_ymd_and_hms(2024, 6, 21, 12, 30, 45).unwrap();
    let snapshot = dashboard::observe(now, &mut DayFactCache::new());
    let frame = dashboard::compose(&snapshot, &theme::LIGHT, None, &options());

    let mut grid = CellGrid::new(frame.width, frame.height);
    grid.blit(&frame.commands);
    let text = grid_text(&grid);

    assert!(text.contains("UTC"));
    assert!(text.contains("MET"));
    assert!(text.contains("CET"));
    // Digital displays for all three zones
    assert!(text.contains("12:30"));
    assert!(text.contains("13:30"));
    assert!(text.contains("14:30"));
    assert!(text.contains("21 juni 2024"));
}

#[test]
fn test_winter_frame_folds_met_into_cet() {
    let now = Utc.with_ymd_and_hms(2024, 12, 21, 9, 0, 0).unwrap();
    let snapshot = dashboard::observe(now, &mut DayFactCache::new());
    let frame = dashboard::compose(&snapshot, &theme::DARK, None, &options());

    let mut grid = CellGrid::new(frame.width, frame.height);
    grid.blit(&frame.commands);
    let text = grid_text(&grid);

    assert!(text.contains("MET / CET"));
    // Two clocks only: the frame is narrower than a three-clock summer frame
    assert!(frame.width < 3.0 * 340.0);
}

#[test]
fn test_frame_shows_clock_numerals() {
    let now = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let snapshot = dashboard::observe(now, &mut DayFactCache::new());
    let frame = dashboard::compose(&snapshot, &theme::LIGHT, None, &options());

    let mut grid = CellGrid::new(frame.width, frame.height);
    grid.blit(&frame.commands);
    let text = grid_text(&grid);

    // Every face renders the 12/3/6/9 numerals
    assert!(text.contains("12"));
    assert!(text.contains('3'));
    assert!(text.contains('6'));
    assert!(text.contains('9'));
}

#[test]
fn test_holiday_message_reaches_the_grid() {
    // Christmas Day 2024, 12:00 Amsterdam time
    let now = Utc.with_ymd_and_hms(2024, 12, 25, 11, 0, 0).unwrap();
    let snapshot = dashboard::observe(now, &mut DayFactCache::new());
    let frame = dashboard::compose(&snapshot, &theme::LIGHT, None, &options());

    let mut grid = CellGrid::new(frame.width, frame.height);
    grid.blit(&frame.commands);
    assert!(grid_text(&grid).contains("Eerste Kerstdag"));
}

#[test]
fn test_dst_notice_reaches_the_grid() {
    // Wednesday before the 2024 autumn transition (October 27)
    let now = Utc.with_ymd_and_hms(2024, 10, 23, 11, 0, 0).unwrap();
    let snapshot = dashboard::observe(now, &mut DayFactCache::new());
    let frame = dashboard::compose(&snapshot, &theme::LIGHT, None, &options());

    let mut grid = CellGrid::new(frame.width, frame.height);
    grid.blit(&frame.commands);
    assert!(grid_text(&grid).contains("Dit weekend gaat de wintertijd in"));
}

#[test]
fn test_preloaded_feed_report_is_displayed() {
    let report = parse_report(
        r#"{
            "maan": {
                "symbool": "🌗",
                "naam": "Laatste kwartier",
                "percentage_tot_hondert": 50.0,
                "is_slinkend": true
            },
            "getijfase": {"omschrijving": "doodtij"}
        }"#,
    )
    .unwrap();
    let poller = FeedPoller::preloaded(report, 2);
    assert!(poller.last_fetch_success());

    let now = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let snapshot = dashboard::observe(now, &mut DayFactCache::new());
    let frame = dashboard::compose(&snapshot, &theme::LIGHT, poller.latest(), &options());

    let mut grid = CellGrid::new(frame.width, frame.height);
    grid.blit(&frame.commands);
    let text = grid_text(&grid);
    assert!(text.contains("doodtij"));
    assert!(text.contains("50%"));
}

#[test]
fn test_april_fools_frame_is_flipped() {
    // 15:30 Amsterdam on April 1 falls in a prank window
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 13, 30, 0).unwrap();
    let snapshot = dashboard::observe(now, &mut DayFactCache::new());
    assert!(snapshot.flipped);

    let frame = dashboard::compose(&snapshot, &theme::LIGHT, None, &options());
    assert!(frame.flipped);
}
