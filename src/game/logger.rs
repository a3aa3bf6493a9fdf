//! Game logging
//!
//! Two layers:
//! - [`GameLog`] lives inside [`crate::game::GameState`] and is the append-only
//!   record of every successful move. It is part of the state value, so it is
//!   compared, cloned and serialized along with everything else.
//! - [`GameLogger`] is the output sink used by simulations and the binary. It
//!   filters by [`VerbosityLevel`], formats as text or JSON lines, and can
//!   capture into memory for tests.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// One line of the in-state game log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub player: usize,
    pub message: String,
}

/// Append-only record of what happened in a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        GameLog {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, turn: u32, player: usize, message: impl Into<String>) {
        self.entries.push(LogEntry {
            turn,
            player,
            message: message.into(),
        });
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended after the first `from` entries
    pub fn since(&self, from: usize) -> &[LogEntry] {
        self.entries.get(from..).unwrap_or(&[])
    }
}

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns and moves (default)
    #[default]
    Normal = 2,
    /// Verbose - moves plus hands and choices
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured line from the [`GameLogger`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedLine {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g. "controller_choice", "game_event")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

/// Guard type that provides read-only access to captured lines
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<CapturedLine>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [CapturedLine];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Verbosity-filtered output sink
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<CapturedLine>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Captured lines, in order
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, message, None);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, message, None);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, message, None);
    }

    /// Log a controller decision at Normal level
    #[inline]
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        if self.verbosity >= VerbosityLevel::Verbose {
            eprintln!("  >>> {}: {}", controller_name, message);
        }
        self.emit(VerbosityLevel::Normal, message, Some("controller_choice"));
    }

    /// Forward in-state log entries (e.g. those appended by one move)
    pub fn game_events(&self, entries: &[LogEntry]) {
        for entry in entries {
            self.emit(
                VerbosityLevel::Normal,
                &format!("[T{} P{}] {}", entry.turn, entry.player + 1, entry.message),
                Some("game_event"),
            );
        }
    }

    fn emit(&self, level: VerbosityLevel, message: &str, category: Option<&'static str>) {
        if level > self.verbosity {
            return;
        }
        let line = CapturedLine {
            level,
            message: message.to_string(),
            category,
        };
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            self.write_stdout(&line);
        }
        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(line);
        }
    }

    fn write_stdout(&self, line: &CapturedLine) {
        match self.output_format {
            OutputFormat::Text => {
                if line.level == VerbosityLevel::Minimal {
                    println!("{}", line.message);
                } else {
                    println!("  {}", line.message);
                }
            }
            OutputFormat::Json => match serde_json::to_string(line) {
                Ok(json) => println!("{json}"),
                Err(_) => println!("{}", line.message),
            },
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}
