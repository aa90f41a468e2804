//! Colored console prompts and line input.
//!
//! Prompts are cyan, status lines yellow, results green and errors red. The
//! console owns its input and output streams so that sessions can be driven
//! from in-memory buffers in tests.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// How long the "Click!" flash stays on screen.
const FLASH_DURATION: Duration = Duration::from_millis(20);

/// Interactive console over a line reader and a writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console. Screen clearing is off until enabled.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: false,
        }
    }

    /// Enables or disables screen clearing and the tap flash.
    pub fn with_screen_clearing(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn banner(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.blue().bold())
    }

    pub fn prompt(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.cyan().bold())?;
        self.output.flush()
    }

    pub fn status(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.yellow().bold())
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.green().bold())
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.red().bold())
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Clears the screen and homes the cursor, if enabled.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Briefly shows "Click!" to acknowledge a tap, if screen clearing is on.
    pub fn flash_click(&mut self) -> io::Result<()> {
        if !self.clear_screen {
            return Ok(());
        }
        self.clear()?;
        self.status("Click!")?;
        self.output.flush()?;
        thread::sleep(FLASH_DURATION);
        self.clear()
    }

    /// Reads one line without the trailing newline. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks `question` until a whole number greater than zero is entered.
    ///
    /// Gives up after `max_attempts` invalid answers or at end of input.
    pub fn read_positive(&mut self, question: &str, max_attempts: u32) -> Result<i64> {
        for _ in 0..max_attempts {
            self.prompt(question)?;
            let Some(line) = self.read_line()? else {
                bail!("input ended while waiting for a number");
            };
            match line.trim().parse::<i64>() {
                Ok(value) if value > 0 => return Ok(value),
                _ => self.error(&format!(
                    "'{}' is not a whole number greater than zero.",
                    line.trim()
                ))?,
            }
        }
        bail!("no valid number entered after {max_attempts} attempts")
    }

    /// Consumes the console and returns the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}
