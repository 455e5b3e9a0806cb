use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use fs2::FileExt;
use signal_hook::{
    consts::signal::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    fs::File,
    io::stdout,
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

use klokr::args::{CliAction, ParsedArgs, RunOverrides, print_help, print_version};
use klokr::calendar::DayFactCache;
use klokr::config::Config;
use klokr::constants::{EXIT_FAILURE, SLEEP_DETECTION_THRESHOLD_SECS, SOLAR_CHECK_INTERVAL_SECS};
use klokr::dashboard::{self, DisplayOptions};
use klokr::feed::FeedPoller;
use klokr::geometry::{FaceSize, WallClockSample};
use klokr::logger::Log;
use klokr::render::terminal::{CellGrid, TerminalSurface};
use klokr::solar::resolve_is_dark;
use klokr::theme::theme_colors;

/// Manages terminal state for the dashboard display.
///
/// Enters the alternate screen and hides the cursor, restoring both when
/// dropped so the user's shell comes back clean even on a panic. Debug
/// mode skips the alternate screen so log output stays visible.
struct TerminalGuard {
    alternate: bool,
}

impl TerminalGuard {
    fn new(alternate: bool) -> Result<Self> {
        if alternate {
            execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
                .context("Failed to enter alternate screen")?;
        } else {
            execute!(stdout(), cursor::Hide).context("Failed to hide cursor")?;
        }
        Ok(Self { alternate })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort restore of screen + cursor visibility
        if self.alternate {
            let _ = execute!(stdout(), terminal::LeaveAlternateScreen);
        }
        let _ = execute!(stdout(), cursor::Show);
    }
}

/// Release the instance lock and remove the lock file from disk.
fn cleanup(lock_file: File, lock_path: &str) {
    Log::log_decorated("Performing cleanup...");

    // Drop the lock file handle to release the lock
    drop(lock_file);

    if let Err(e) = std::fs::remove_file(lock_path) {
        Log::log_decorated(&format!("Warning: Failed to remove lock file: {}", e));
    }

    Log::log_decorated("Cleanup complete");
}

fn main() -> Result<()> {
    let parsed = ParsedArgs::parse(std::env::args());

    match parsed.action {
        CliAction::ShowHelp => {
            print_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            print_version();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            print_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run(overrides) => run(overrides),
    }
}

fn run(overrides: RunOverrides) -> Result<()> {
    Log::log_version();

    // Set up signal handling
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    thread::spawn(move || {
        for _signal in signals.forever() {
            r.store(false, Ordering::SeqCst);
        }
    });

    // Create and acquire lock file
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    let lock_path = format!("{}/klokr.lock", runtime_dir);
    let lock_file = File::create(&lock_path)?;

    if lock_file.try_lock_exclusive().is_err() {
        Log::log_error(
            "Another instance of klokr is already running.\n\
            • Kill klokr before restarting.",
        );
        std::process::exit(EXIT_FAILURE);
    }
    Log::log_decorated("Lock acquired, starting klokr...");

    let config = Config::load()?;
    config.log_config();

    // CLI overrides win over the config file
    let theme_mode = overrides.theme.unwrap_or_else(|| config.theme_mode());
    let options = DisplayOptions {
        face: overrides
            .face_size
            .and_then(FaceSize::from_px)
            .unwrap_or_else(|| config.face()),
        show_flags: config.show_flags() && !overrides.hide_flags,
        creature_mode: config.creature_mode() || overrides.creature_mode,
    };

    let mut poller = FeedPoller::spawn(config.feed_url(), config.feed_poll_minute())
        .context("Failed to start the moon/tide feed poller")?;
    poller.request_now();

    let mut is_dark = resolve_is_dark(
        theme_mode,
        chrono::Utc::now(),
        config.latitude(),
        config.longitude(),
    )
    .context("Failed to determine initial day/night state")?;

    Log::log_block_start(&format!(
        "Starting dashboard ({} theme, {} px faces)",
        theme_mode.as_str(),
        options.face.side_px()
    ));

    let guard = TerminalGuard::new(!overrides.debug_enabled)?;
    if !overrides.debug_enabled {
        // The renderer owns the screen now; logs would bleed into frames
        Log::set_enabled(false);
    }

    let mut cache = DayFactCache::new();
    let mut surface = TerminalSurface::new();
    let mut last_solar_check = Instant::now();
    let mut last_tick = Instant::now();
    let mut first_iteration = true;

    while running.load(Ordering::SeqCst) {
        let now = chrono::Utc::now();

        // Detect large time jumps (system sleep/resume scenarios) and
        // force a solar recheck so the theme catches up immediately
        let time_since_last_tick = last_tick.elapsed();
        last_tick = Instant::now();
        let resumed_from_sleep =
            time_since_last_tick > Duration::from_secs(SLEEP_DETECTION_THRESHOLD_SECS);
        if resumed_from_sleep {
            Log::log_decorated(&format!(
                "Large time jump detected ({} minutes). System may have resumed from sleep.",
                time_since_last_tick.as_secs() / 60
            ));
        }

        // Day/night state is re-evaluated once per minute, not every tick
        if first_iteration
            || resumed_from_sleep
            || last_solar_check.elapsed() >= Duration::from_secs(SOLAR_CHECK_INTERVAL_SECS)
        {
            match resolve_is_dark(theme_mode, now, config.latitude(), config.longitude()) {
                Ok(dark) => is_dark = dark,
                Err(e) => Log::log_warning(&format!("Solar calculation failed: {}", e)),
            }
            last_solar_check = Instant::now();
        }
        first_iteration = false;

        let snapshot = dashboard::observe(now, &mut cache);

        // The poll schedule runs on Dutch local time, like the feed itself
        poller.tick(snapshot.cet.minute, snapshot.cet.second);

        let palette = theme_colors(is_dark);
        let frame = dashboard::compose(&snapshot, &palette, poller.latest(), &options);

        let mut grid = CellGrid::new(frame.width, frame.height);
        grid.blit(&frame.commands);
        if frame.flipped {
            grid.flip();
        }
        if let Err(e) = surface.present(&grid) {
            Log::log_warning(&format!("Failed to present frame: {}", e));
        }

        // Sleep to the next second boundary so the second hand ticks on time
        let sample = WallClockSample::from_time(&chrono::Utc::now().time());
        let sleep_ms = (1000 - sample.millisecond as u64).min(1000);
        let mut slept = Duration::ZERO;
        let target = Duration::from_millis(sleep_ms);
        while slept < target && running.load(Ordering::SeqCst) {
            let chunk = Duration::from_millis(100).min(target - slept);
            thread::sleep(chunk);
            slept += chunk;
        }
    }

    // Leave the alternate screen before shutdown logging
    drop(guard);
    Log::set_enabled(true);

    Log::log_block_start("Shutting down klokr...");
    cleanup(lock_file, &lock_path);
    Log::log_end();

    Ok(())
}
