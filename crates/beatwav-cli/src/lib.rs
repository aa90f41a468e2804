//! beatwav CLI library.
//!
//! Keypress capture, tap-tempo recording, the interactive session and the
//! command implementations behind the `beatwav` binary.

pub mod clock;
pub mod commands;
pub mod console;
pub mod keys;
pub mod logging;
pub mod session;
pub mod tap;
