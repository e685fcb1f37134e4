use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{DEFAULT_HOUR, DEFAULT_MINUTE};

/// The hour/minute currently chosen in a picker.
///
/// Values are not range checked. Whatever the anchor held is kept verbatim
/// and faces decide how to draw out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeState {
    pub hour: u32,
    pub minute: u32,
}

impl TimeState {
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Parse the first `H+:M+` run found anywhere in `text`.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = TIME_PATTERN.captures(text)?;
        let hour = caps.get(1)?.as_str().parse().ok()?;
        let minute = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { hour, minute })
    }

    /// Parse `text`, falling back to the default time when nothing matches.
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_default()
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(DEFAULT_HOUR, DEFAULT_MINUTE)
    }
}

impl fmt::Display for TimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+):([0-9]+)").expect("time pattern is valid"));

/// Read-only view of a picker's time, handed out to observers.
#[derive(Debug, Clone)]
pub struct TimeHandle {
    cell: Rc<Cell<TimeState>>,
}

impl TimeHandle {
    pub(crate) fn new(cell: Rc<Cell<TimeState>>) -> Self {
        Self { cell }
    }

    pub fn get(&self) -> TimeState {
        self.cell.get()
    }
}
