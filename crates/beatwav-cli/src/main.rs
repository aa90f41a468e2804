//! beatwav - tap a tempo, get a click track
//!
//! This binary records a tempo from keypresses (or takes a BPM value) and
//! writes WAV click tracks for syncing video to music.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use beatwav_cli::commands;
use beatwav_cli::logging;
use beatwav_cli::session::SessionConfig;

/// beatwav - Tap-tempo click track generator
#[derive(Parser)]
#[command(name = "beatwav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory the WAV files are written to
    #[arg(short, long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tap along to music and generate click tracks interactively (default)
    Record {
        /// Do not clear the screen or flash on each tap
        #[arg(long)]
        no_clear: bool,

        /// Invalid answers tolerated per question
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        max_attempts: u32,
    },

    /// Generate click tracks from a known tempo
    Bpm {
        /// Tempo in beats per minute
        #[arg(short, long)]
        bpm: i64,

        /// Number of beats in each file
        #[arg(long)]
        beats: i64,

        /// Also write a file with this many sub-beats per beat (repeatable)
        #[arg(short, long = "subdivide")]
        subdivide: Vec<i64>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate click tracks from a recorded click count and duration
    Tap {
        /// Number of clicks recorded
        #[arg(long)]
        clicks: i64,

        /// Seconds between the first and the last keypress
        #[arg(long)]
        seconds: f64,

        /// Number of beats in each file
        #[arg(long)]
        beats: i64,

        /// Also write a file with this many sub-beats per beat (repeatable)
        #[arg(short, long = "subdivide")]
        subdivide: Vec<i64>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show header fields and click positions of a WAV file
    Inspect {
        /// Path to the WAV file
        file: PathBuf,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let command = cli.command.unwrap_or(Commands::Record {
        no_clear: false,
        max_attempts: 5,
    });

    let result = match command {
        Commands::Record {
            no_clear,
            max_attempts,
        } => {
            let config = SessionConfig {
                out_dir: cli.out_dir,
                clear_screen: !no_clear,
                max_attempts,
            };
            commands::record::run(&config)
        }
        Commands::Bpm {
            bpm,
            beats,
            subdivide,
            json,
        } => commands::generate::run_bpm(bpm, beats, &subdivide, &cli.out_dir, json),
        Commands::Tap {
            clicks,
            seconds,
            beats,
            subdivide,
            json,
        } => commands::generate::run_tap(clicks, seconds, beats, &subdivide, &cli.out_dir, json),
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_record() {
        let cli = Cli::try_parse_from(["beatwav"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parses_bpm_with_subdivisions() {
        let cli = Cli::try_parse_from([
            "beatwav", "--out-dir", "clicks", "bpm", "--bpm", "128", "--beats", "16", "-s", "2",
            "-s", "4",
        ])
        .unwrap();
        assert_eq!(cli.out_dir, PathBuf::from("clicks"));
        match cli.command {
            Some(Commands::Bpm {
                bpm,
                beats,
                subdivide,
                json,
            }) => {
                assert_eq!(bpm, 128);
                assert_eq!(beats, 16);
                assert_eq!(subdivide, vec![2, 4]);
                assert!(!json);
            }
            _ => panic!("expected bpm command"),
        }
    }

    #[test]
    fn test_cli_parses_tap() {
        let cli = Cli::try_parse_from([
            "beatwav", "tap", "--clicks", "4", "--seconds", "2.0", "--beats", "4", "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Tap {
                clicks,
                seconds,
                beats,
                subdivide,
                json,
            }) => {
                assert_eq!(clicks, 4);
                assert_eq!(seconds, 2.0);
                assert_eq!(beats, 4);
                assert!(subdivide.is_empty());
                assert!(json);
            }
            _ => panic!("expected tap command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["beatwav", "record", "--no-clear", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Record {
                no_clear,
                max_attempts,
            }) => {
                assert!(no_clear);
                assert_eq!(max_attempts, 5);
            }
            _ => panic!("expected record command"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_max_attempts() {
        assert!(Cli::try_parse_from(["beatwav", "record", "--max-attempts", "0"]).is_err());
        let cli = Cli::try_parse_from(["beatwav", "record", "--max-attempts", "1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Record {
                max_attempts: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_requires_beats_for_bpm() {
        assert!(Cli::try_parse_from(["beatwav", "bpm", "--bpm", "120"]).is_err());
    }
}
