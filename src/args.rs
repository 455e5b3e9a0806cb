//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a
//! clean interface for the main application logic. It supports the
//! standard help, version, and debug flags plus the presentation overrides
//! (theme, face size, iconography) while gracefully handling unknown
//! options.

use crate::logger::Log;
use crate::solar::ThemeMode;

/// Presentation overrides applied on top of the configuration file.
#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub struct RunOverrides {
    pub debug_enabled: bool,
    pub theme: Option<ThemeMode>,
    pub face_size: Option<u32>,
    pub creature_mode: bool,
    pub hide_flags: bool,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the dashboard with these overrides
    Run(RunOverrides),
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = RunOverrides::default();
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = &args_vec[i];
            match arg_str.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => overrides.debug_enabled = true,
                "--creature" | "-c" => overrides.creature_mode = true,
                "--no-flags" | "-n" => overrides.hide_flags = true,
                "--theme" | "-t" => {
                    // Parse: --theme <day|night>
                    if i + 1 < args_vec.len() {
                        match ThemeMode::parse(&args_vec[i + 1]) {
                            Some(mode) => overrides.theme = Some(mode),
                            None => {
                                Log::log_warning(&format!(
                                    "Invalid theme value: {}",
                                    args_vec[i + 1]
                                ));
                                unknown_arg_found = true;
                            }
                        }
                        i += 1; // Skip the consumed value
                    } else {
                        Log::log_warning("--theme requires a value: auto, day or night");
                        unknown_arg_found = true;
                    }
                }
                "--size" | "-s" => {
                    // Parse: --size <200|300|400>
                    if i + 1 < args_vec.len() {
                        match args_vec[i + 1].parse::<u32>() {
                            Ok(px) if crate::geometry::FaceSize::from_px(px).is_some() => {
                                overrides.face_size = Some(px)
                            }
                            _ => {
                                Log::log_warning(&format!(
                                    "Invalid face size: {} (expected 200, 300 or 400)",
                                    args_vec[i + 1]
                                ));
                                unknown_arg_found = true;
                            }
                        }
                        i += 1; // Skip the consumed value
                    } else {
                        Log::log_warning("--size requires a value: 200, 300 or 400");
                        unknown_arg_found = true;
                    }
                }
                unknown => {
                    Log::log_warning(&format!("Unknown argument: {}", unknown));
                    unknown_arg_found = true;
                }
            }
            i += 1;
        }

        let action = if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else if display_version {
            CliAction::ShowVersion
        } else {
            CliAction::Run(overrides)
        };

        ParsedArgs { action }
    }
}

/// Print usage information for the command-line interface.
pub fn print_help() {
    println!("klokr v{}", env!("CARGO_PKG_VERSION"));
    println!("Multi-timezone terminal clock dashboard for Dutch waters");
    println!();
    println!("Usage: klokr [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!("  -d, --debug         Plain output with logging, no alternate screen");
    println!("  -t, --theme <MODE>  Force the theme: auto, day or night");
    println!("  -s, --size <PX>     Clock face size: 200, 300 or 400");
    println!("  -c, --creature      Rotate an hourly sea creature instead of the seal");
    println!("  -n, --no-flags      Hide the flags next to the clock titles");
}

/// Print version information.
pub fn print_version() {
    println!("klokr {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["klokr"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_no_args_runs_with_defaults() {
        assert_eq!(parse(&[]), CliAction::Run(RunOverrides::default()));
    }

    #[test]
    fn test_help_flag() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-h"]), CliAction::ShowHelp);
    }

    #[test]
    fn test_version_flag() {
        assert_eq!(parse(&["--version"]), CliAction::ShowVersion);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_theme_override() {
        match parse(&["--theme", "night"]) {
            CliAction::Run(overrides) => assert_eq!(overrides.theme, Some(ThemeMode::Night)),
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_theme_shows_help() {
        assert_eq!(parse(&["--theme", "dusk"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--theme"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_size_override() {
        match parse(&["--size", "400"]) {
            CliAction::Run(overrides) => assert_eq!(overrides.face_size, Some(400)),
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_size_shows_help() {
        assert_eq!(parse(&["--size", "250"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_combined_flags() {
        match parse(&["-d", "-c", "-n"]) {
            CliAction::Run(overrides) => {
                assert!(overrides.debug_enabled);
                assert!(overrides.creature_mode);
                assert!(overrides.hide_flags);
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_argument_shows_help() {
        assert_eq!(parse(&["--frobnicate"]), CliAction::ShowHelpDueToError);
    }
}
