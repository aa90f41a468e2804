//! `record` command: the interactive tap-tempo session.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;

use crate::clock::{Clock, SystemClock};
use crate::console::Console;
use crate::keys::{KeySource, TerminalKeys};
use crate::session::{Session, SessionConfig};
use crate::tap::{TapRecorder, TapSource};

/// Run the record command against the terminal.
pub fn run(config: &SessionConfig) -> Result<ExitCode> {
    let stdin = io::stdin();
    let mut console =
        Console::new(stdin.lock(), io::stdout()).with_screen_clearing(config.clear_screen);
    let mut keys = TerminalKeys::new();
    let clock = SystemClock::new();

    run_with(config, &mut console, &mut keys, &clock)
}

/// Runs the whole interactive flow over the given console, keys and clock.
pub fn run_with<R, W, K, C>(
    config: &SessionConfig,
    console: &mut Console<R, W>,
    keys: &mut K,
    clock: &C,
) -> Result<ExitCode>
where
    R: BufRead,
    W: Write,
    K: KeySource,
    C: Clock,
{
    print_welcome(console)?;

    let measurement = TapRecorder::new(config.max_attempts).record(console, keys, clock)?;
    if measurement.source == TapSource::Recorded {
        console.info(&format!(
            "Recorded {} clicks in {:.3} seconds.",
            measurement.clicks, measurement.elapsed_seconds
        ))?;
    }
    if let Some(bpm) = measurement.bpm() {
        console.info(&format!("Tempo: {:.2} BPM", bpm))?;
    }

    let mut session = Session::new(config);
    let written = session.run(&measurement, console, keys)?;

    Ok(if written.is_empty() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn print_welcome<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.clear()?;
    console.banner("Hello! Welcome to beatwav!")?;
    console.prompt("-\nHow does it work?")?;
    console.success(
        "-> Listen to the music of your choice. Tap along on the beat and beatwav will \
         generate a .wav with a loud click on every beat, for syncing video to music in \
         your editing software.",
    )?;
    console.success(
        "-> Alternatively, if you already know the BPM of your music, enter it directly.",
    )?;
    console.info("")
}
