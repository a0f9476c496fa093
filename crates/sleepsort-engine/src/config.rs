//! Sorter configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Where delay tasks run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// One lightweight task per element on a single-threaded run loop
    #[default]
    Cooperative,
    /// One OS thread per element
    Threads,
}

/// Ordering of tasks whose values are equal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Equal values appear in input order
    #[default]
    InputOrder,
    /// Equal values appear in whatever order their timers fired
    Arrival,
}

/// Sorter configuration
///
/// The unit scale is a crate constant (`sleepsort_core::UNIT_NANOS`), not a field.
#[derive(Clone, Debug, Default)]
pub struct SorterConfig {
    /// Task backend
    pub backend: Backend,
    /// Tie-break policy for equal values
    pub tie_break: TieBreak,
    /// Optional overall limit; `None` runs to completion unconditionally
    pub timeout: Option<Duration>,
}

impl SorterConfig {
    /// Configuration running one OS thread per element
    pub fn threaded() -> Self {
        SorterConfig {
            backend: Backend::Threads,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// Error parsing a configuration name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{name}' (expected one of: {expected})")]
pub struct ParseConfigError {
    kind: &'static str,
    name: String,
    expected: &'static str,
}

impl FromStr for Backend {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cooperative" => Ok(Backend::Cooperative),
            "threads" => Ok(Backend::Threads),
            _ => Err(ParseConfigError {
                kind: "backend",
                name: s.to_string(),
                expected: "cooperative, threads",
            }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cooperative => f.write_str("cooperative"),
            Backend::Threads => f.write_str("threads"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input-order" => Ok(TieBreak::InputOrder),
            "arrival" => Ok(TieBreak::Arrival),
            _ => Err(ParseConfigError {
                kind: "tie-break policy",
                name: s.to_string(),
                expected: "input-order, arrival",
            }),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::InputOrder => f.write_str("input-order"),
            TieBreak::Arrival => f.write_str("arrival"),
        }
    }
}
