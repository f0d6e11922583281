//! Copy-to-clipboard affordance.
//!
//! ```text
//!          press                 reset deadline
//!   Idle ─────────► Pressed ──────────────────────► Idle
//!                      │                              ▲
//!                      │ write failed                 │ reset deadline
//!                      ▼                              │
//!                    Failed ──────────────────────────┘
//! ```
//!
//! Pressing switches to `Pressed` before the write result is known. Every
//! press schedules its own reset; resets are never cancelled, so a second
//! press shortly after the first is reverted by the first press's deadline.
//! The page script follows the same rules with `setTimeout`.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,
    #[error("clipboard write denied: {0}")]
    Denied(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Destination for copied text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that prints to a writer, stdout by default.
///
/// Used by `snippet` so the copied text can be piped into the system
/// clipboard tool (`pbcopy`, `wl-copy`, `xclip`).
pub struct StdoutClipboard<W: Write = io::Stdout> {
    out: W,
}

impl StdoutClipboard<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutClipboard<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutClipboard<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for StdoutClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyState {
    #[default]
    Idle,
    Pressed,
    Failed,
}

impl CopyState {
    /// Value of the button's `data-state` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            CopyState::Idle => "idle",
            CopyState::Pressed => "pressed",
            CopyState::Failed => "failed",
        }
    }
}

/// Copy button state for one code panel.
#[derive(Debug, Clone)]
pub struct CopyAffordance {
    payload: String,
    state: CopyState,
    reset_after: Duration,
    deadlines: VecDeque<Instant>,
}

impl CopyAffordance {
    /// Capture `source` with surrounding whitespace stripped.
    pub fn new(source: &str, reset_after: Duration) -> Self {
        Self {
            payload: source.trim().to_string(),
            state: CopyState::Idle,
            reset_after,
            deadlines: VecDeque::new(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn state(&self) -> CopyState {
        self.state
    }

    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }

    /// Click: go to `Pressed` now and hand back the text to write.
    pub fn press(&mut self, now: Instant) -> &str {
        self.state = CopyState::Pressed;
        self.deadlines.push_back(now + self.reset_after);
        &self.payload
    }

    /// Outcome of the clipboard write started by [`press`](Self::press).
    ///
    /// A failure is logged and shown until the next reset. An outcome that
    /// arrives after the reset already happened leaves the button idle.
    pub fn complete(&mut self, result: Result<(), ClipboardError>) {
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to copy to clipboard");
            if self.state != CopyState::Idle {
                self.state = CopyState::Failed;
            }
        }
    }

    /// Advance the clock. Any elapsed deadline returns the button to idle.
    pub fn tick(&mut self, now: Instant) -> CopyState {
        let mut elapsed = false;
        while self.deadlines.front().is_some_and(|d| *d <= now) {
            self.deadlines.pop_front();
            elapsed = true;
        }
        if elapsed {
            self.state = CopyState::Idle;
        }
        self.state
    }

    /// Press and write synchronously.
    pub fn copy_to(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> CopyState {
        let result = clipboard.write_text(self.press(now));
        self.complete(result);
        self.state
    }
}
