//! This module defines the core data structures and types used throughout the Universal Turing
//! Machine simulator: states, symbols, transitions, execution outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A tape symbol. Machine alphabets are made of single characters.
pub type Symbol = char;

/// The blank symbol filling every tape cell that was never written.
pub const BLANK_SYMBOL: Symbol = 'B';
/// The maximum allowed size for a serialized machine description in bytes.
pub const MAX_DESCRIPTION_SIZE: usize = 65536; // 64KB

/// Identifier of a control state.
///
/// States compare and hash by their identifier, so two independently constructed
/// states with the same name are interchangeable in accept/reject sets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier of this state.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Represents the possible directions the head can move after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    #[serde(rename = "L")]
    Left,
    /// Move the head one cell to the right.
    #[serde(rename = "R")]
    Right,
}

impl Direction {
    /// Returns the interchange token for this direction.
    pub fn token(self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
        }
    }

    /// Parses an interchange token (`"L"` or `"R"`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Direction::Left),
            "R" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A single rule: in `state`, reading `read`, write `write`, move the head by
/// `direction`, and continue in `next_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: State,
    pub read: Symbol,
    pub next_state: State,
    pub write: Symbol,
    pub direction: Direction,
}

impl Transition {
    pub fn new(
        state: impl Into<State>,
        read: Symbol,
        next_state: impl Into<State>,
        write: Symbol,
        direction: Direction,
    ) -> Self {
        Self {
            state: state.into(),
            read,
            next_state: next_state.into(),
            write,
            direction,
        }
    }

    /// Checks whether this rule applies to the given configuration.
    pub fn matches(&self, state: &State, symbol: Symbol) -> bool {
        self.state == *state && self.read == symbol
    }
}

/// Where a machine stands in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No halting state has been reached yet.
    Running,
    /// Halted in the given accept state.
    Accepted(State),
    /// Halted in the given reject state, or stuck in a state with no applicable rule.
    Rejected(State),
}

impl Status {
    pub fn is_halted(&self) -> bool {
        !matches!(self, Status::Running)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Status::Accepted(_))
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The machine applied a rule and is still running.
    Continue,
    /// The machine is in a terminal status; further steps do nothing.
    Halt(Status),
}

/// Represents the errors surfaced by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UtmError {
    /// The interchange data is missing required fields or has the wrong shape.
    #[error("Malformed machine description: {0}")]
    MalformedDescription(String),
    /// A state is declared as both accepting and rejecting.
    #[error("State {0} is both an accept and a reject state")]
    ConflictingHaltState(State),
    /// A state or symbol has no binary encoding.
    #[error("Encoding error: {0}")]
    EncodingError(String),
    /// A bounded run did not reach a halting state in time.
    #[error("No halting state reached within {0} steps")]
    StepLimitExceeded(usize),
    /// No bundled program matches the requested name or index.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
    /// Indicates an error related to reading description files.
    #[error("File error: {0}")]
    FileError(String),
}
