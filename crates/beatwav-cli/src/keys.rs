//! Single-keypress input.
//!
//! The tap recorder and the session read one key at a time without waiting
//! for Enter. [`TerminalKeys`] reads from the terminal in raw mode;
//! [`ScriptedKeys`] replays a fixed sequence and drives a [`ManualClock`] so
//! that recordings can be tested without a terminal.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::clock::ManualClock;

/// A key as seen by the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Ctrl+C.
    Interrupt,
    /// Any printable character other than space.
    Char(char),
    /// Anything else (arrows, function keys, ...).
    Other,
}

impl Key {
    /// Returns true for `y` or `Y`.
    pub fn is_yes(self) -> bool {
        matches!(self, Key::Char('y') | Key::Char('Y'))
    }

    /// Text echoed back after a prompt answered with this key.
    pub fn echo(self) -> String {
        match self {
            Key::Space => "<space>".to_string(),
            Key::Enter => "<enter>".to_string(),
            Key::Escape => "<esc>".to_string(),
            Key::Interrupt => "^C".to_string(),
            Key::Char(c) => c.to_string(),
            Key::Other => "?".to_string(),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Interrupt
            }
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Source of single keypresses.
pub trait KeySource {
    /// Blocks until the next key is pressed.
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Reads keypresses from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    /// Creates a terminal key source.
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        terminal::enable_raw_mode()?;
        let key = loop {
            match event::read() {
                // Only handle key press events (not release)
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(Key::from(key)),
                Ok(_) => continue,
                Err(e) => break Err(e),
            }
        };
        terminal::disable_raw_mode()?;
        key
    }
}

/// Replays a fixed key sequence.
///
/// Each key can carry the time that passes before it is pressed; reading it
/// advances the attached clock by that amount.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<(Duration, Key)>,
    clock: Option<ManualClock>,
}

impl ScriptedKeys {
    /// Keys pressed with no time in between.
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().map(|k| (Duration::ZERO, k)).collect(),
            clock: None,
        }
    }

    /// Keys pressed after the given delays, advancing `clock`.
    pub fn timed(keys: impl IntoIterator<Item = (Duration, Key)>, clock: ManualClock) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            clock: Some(clock),
        }
    }

    /// Number of keys not yet read.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        let (delay, key) = self
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))?;
        if let Some(clock) = &self.clock {
            clock.advance(delay);
        }
        Ok(key)
    }
}
