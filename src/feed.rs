//! Moon and tide phase feed client.
//!
//! Rijkswaterstaat publishes a small JSON document describing the current
//! moon phase and tide phase. The dashboard polls it once per hour at a
//! fixed minute offset; after a failed fetch the poller falls back to a
//! once-per-minute retry cadence until a fetch succeeds again. Failures
//! are logged and never surfaced to the display; the last good report
//! (or a placeholder before the first success) stays on screen.
//!
//! Fetches run on a dedicated worker thread so a slow response can never
//! stall the 1 Hz render tick; the main loop pumps triggers in and drains
//! results out through channels.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::constants::FEED_TIMEOUT_SECS;
use crate::logger::Log;

/// Moon phase fields of the feed document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoonPhase {
    #[serde(rename = "symbool")]
    pub symbol: String,
    #[serde(rename = "naam")]
    pub name: String,
    #[serde(rename = "percentage_tot_hondert")]
    pub percentage: f64,
    #[serde(rename = "is_groeiend", default)]
    pub is_waxing: bool,
    #[serde(rename = "is_slinkend", default)]
    pub is_waning: bool,
}

/// Tide phase fields of the feed document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TidePhase {
    #[serde(rename = "omschrijving")]
    pub description: String,
    #[serde(rename = "omschrijving_lang", default)]
    pub description_long: String,
}

/// One complete report from the moon/tide feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoonTideReport {
    #[serde(rename = "maan")]
    pub moon: MoonPhase,
    #[serde(rename = "getijfase")]
    pub tide: TidePhase,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Parse a feed document, trimming the whitespace the feed pads its
/// symbol and description fields with.
pub fn parse_report(json: &str) -> Result<MoonTideReport> {
    let mut report: MoonTideReport =
        serde_json::from_str(json).context("Failed to parse moon/tide feed document")?;
    report.moon.symbol = report.moon.symbol.trim().to_string();
    report.moon.name = report.moon.name.trim().to_string();
    report.tide.description = report.tide.description.trim().to_string();
    report.tide.description_long = report.tide.description_long.trim().to_string();
    Ok(report)
}

/// Decide whether a fetch should fire at this minute/second.
///
/// Fetches fire only on whole-minute boundaries: every hour at the
/// configured poll minute, and, after a failure, at every minute until
/// a fetch succeeds again.
pub fn should_fetch(
    last_fetch_success: bool,
    poll_minute: u32,
    minute: u32,
    second: u32,
) -> bool {
    if second != 0 {
        return false;
    }
    minute == poll_minute || !last_fetch_success
}

/// Polls the feed from a worker thread and keeps the latest good report.
pub struct FeedPoller {
    trigger_tx: Sender<()>,
    result_rx: Receiver<Result<MoonTideReport>>,
    latest: Option<MoonTideReport>,
    last_fetch_success: bool,
    fetch_in_flight: bool,
    poll_minute: u32,
}

impl FeedPoller {
    /// Spawn the worker thread and return the poller handle.
    ///
    /// The worker owns the HTTP client and blocks on its own channel;
    /// dropping the poller closes the channel and ends the thread.
    pub fn spawn(url: String, poll_minute: u32) -> Result<Self> {
        let (trigger_tx, trigger_rx) = mpsc::channel::<()>();
        let (result_tx, result_rx) = mpsc::channel::<Result<MoonTideReport>>();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(FEED_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client for the moon/tide feed")?;

        thread::spawn(move || {
            for () in trigger_rx {
                let outcome = fetch_once(&client, &url);
                if result_tx.send(outcome).is_err() {
                    break; // poller dropped, stop fetching
                }
            }
        });

        Ok(Self {
            trigger_tx,
            result_rx,
            latest: None,
            last_fetch_success: false,
            fetch_in_flight: false,
            poll_minute,
        })
    }

    /// Request a fetch immediately (used once at startup).
    pub fn request_now(&mut self) {
        if !self.fetch_in_flight && self.trigger_tx.send(()).is_ok() {
            self.fetch_in_flight = true;
        }
    }

    /// Drive the poll schedule for the current minute and second.
    ///
    /// Drains any finished fetch first, then decides whether a new fetch
    /// is due. Called once per tick from the main loop.
    pub fn tick(&mut self, minute: u32, second: u32) {
        self.drain_results();

        if self.fetch_in_flight {
            return;
        }
        if should_fetch(self.last_fetch_success, self.poll_minute, minute, second) {
            self.request_now();
        }
    }

    /// The most recent successfully fetched report, if any.
    pub fn latest(&self) -> Option<&MoonTideReport> {
        self.latest.as_ref()
    }

    pub fn last_fetch_success(&self) -> bool {
        self.last_fetch_success
    }

    /// Build a poller that already holds a report, without a worker
    /// thread. Lets tests drive the display path deterministically.
    #[cfg(feature = "testing-support")]
    pub fn preloaded(report: MoonTideReport, poll_minute: u32) -> Self {
        let (trigger_tx, _stub_trigger_rx) = mpsc::channel();
        let (_stub_result_tx, result_rx) = mpsc::channel();
        Self {
            trigger_tx,
            result_rx,
            latest: Some(report),
            last_fetch_success: true,
            fetch_in_flight: false,
            poll_minute,
        }
    }

    fn drain_results(&mut self) {
        loop {
            match self.result_rx.try_recv() {
                Ok(Ok(report)) => {
                    self.fetch_in_flight = false;
                    self.last_fetch_success = true;
                    Log::log_debug("Moon/tide report fetched successfully");
                    self.latest = Some(report);
                }
                Ok(Err(e)) => {
                    self.fetch_in_flight = false;
                    self.last_fetch_success = false;
                    Log::log_warning(&format!(
                        "Moon/tide fetch failed, retrying every minute: {}",
                        e
                    ));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

fn fetch_once(client: &reqwest::blocking::Client, url: &str) -> Result<MoonTideReport> {
    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("Failed to fetch moon/tide feed from {}", url))?
        .text()
        .context("Failed to read moon/tide feed body")?;

    parse_report(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "maan": {
            "symbool": "🌕 ",
            "naam": " Volle maan",
            "percentage_tot_hondert": 98.4,
            "is_groeiend": false,
            "is_slinkend": true
        },
        "getijfase": {
            "omschrijving": "springtij ",
            "omschrijving_lang": "Het is springtij: het verschil tussen hoog- en laagwater is maximaal."
        },
        "timestamp": "2024-06-21T10:02:00Z"
    }"#;

    #[test]
    fn test_parse_report_trims_fields() {
        let report = parse_report(SAMPLE).unwrap();
        assert_eq!(report.moon.symbol, "🌕");
        assert_eq!(report.moon.name, "Volle maan");
        assert_eq!(report.moon.percentage, 98.4);
        assert!(report.moon.is_waning);
        assert!(!report.moon.is_waxing);
        assert_eq!(report.tide.description, "springtij");
        assert_eq!(report.timestamp.as_deref(), Some("2024-06-21T10:02:00Z"));
    }

    #[test]
    fn test_parse_report_missing_optional_fields() {
        let minimal = r#"{
            "maan": {"symbool": "🌑", "naam": "Nieuwe maan", "percentage_tot_hondert": 0},
            "getijfase": {"omschrijving": "doodtij"}
        }"#;
        let report = parse_report(minimal).unwrap();
        assert!(!report.moon.is_waning);
        assert_eq!(report.tide.description_long, "");
        assert_eq!(report.timestamp, None);
    }

    #[test]
    fn test_parse_report_rejects_garbage() {
        assert!(parse_report("not json").is_err());
        assert!(parse_report("{}").is_err());
    }

    #[test]
    fn test_should_fetch_hourly_alignment() {
        // Healthy poller only fires at the poll minute
        assert!(should_fetch(true, 2, 2, 0));
        assert!(!should_fetch(true, 2, 3, 0));
        assert!(!should_fetch(true, 2, 30, 0));
    }

    #[test]
    fn test_should_fetch_retries_every_minute_after_failure() {
        assert!(should_fetch(false, 2, 17, 0));
        assert!(should_fetch(false, 2, 18, 0));
    }

    #[test]
    fn test_should_fetch_only_on_minute_boundary() {
        assert!(!should_fetch(false, 2, 17, 1));
        assert!(!should_fetch(true, 2, 2, 59));
    }
}
