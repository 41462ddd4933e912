//! This module defines `MachineDescription`, the immutable rule set of a single-tape
//! Turing Machine, together with its interchange form.
//!
//! The interchange form is the JSON shape
//!
//! ```text
//! { "transitions": [[state, read, next_state, write, "L" | "R"], ...],
//!   "start_state": state,
//!   "accept_states": [state, ...],
//!   "reject_states": [state, ...] }
//! ```
//!
//! Set-derived lists are emitted in sorted order so encoding is deterministic.

use crate::types::{Direction, State, Symbol, Transition, UtmError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Number of fields in an interchange transition tuple.
const TRANSITION_ARITY: usize = 5;

/// The serialized shape of a `MachineDescription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterchangeForm {
    pub transitions: Vec<Vec<String>>,
    pub start_state: String,
    pub accept_states: Vec<String>,
    pub reject_states: Vec<String>,
}

/// The full definition of a machine: its transitions plus start and halting states.
///
/// A description is never mutated after construction, so any number of engines
/// (including ones on other threads) can borrow it at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineDescription {
    transitions: Vec<Transition>,
    start_state: State,
    accept_states: BTreeSet<State>,
    reject_states: BTreeSet<State>,
}

impl MachineDescription {
    /// Creates a description, rejecting any state declared both accepting and rejecting.
    ///
    /// # Arguments
    ///
    /// * `transitions` - The rules, in lookup order.
    /// * `start_state` - The state a fresh machine starts in.
    /// * `accept_states` - States that halt with an accepted verdict.
    /// * `reject_states` - States that halt with a rejected verdict.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDescription)` if the halting sets are disjoint.
    /// * `Err(UtmError::ConflictingHaltState)` naming the first state found in both sets.
    pub fn new(
        transitions: Vec<Transition>,
        start_state: impl Into<State>,
        accept_states: impl IntoIterator<Item = State>,
        reject_states: impl IntoIterator<Item = State>,
    ) -> Result<Self, UtmError> {
        let accept_states: BTreeSet<State> = accept_states.into_iter().collect();
        let reject_states: BTreeSet<State> = reject_states.into_iter().collect();

        if let Some(state) = accept_states.intersection(&reject_states).next() {
            return Err(UtmError::ConflictingHaltState(state.clone()));
        }

        let description = Self {
            transitions,
            start_state: start_state.into(),
            accept_states,
            reject_states,
        };

        debug!(
            transitions = description.transitions.len(),
            start = %description.start_state,
            "Machine description created"
        );

        Ok(description)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn start_state(&self) -> &State {
        &self.start_state
    }

    pub fn accept_states(&self) -> &BTreeSet<State> {
        &self.accept_states
    }

    pub fn reject_states(&self) -> &BTreeSet<State> {
        &self.reject_states
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        self.accept_states.contains(state)
    }

    pub fn is_rejecting(&self, state: &State) -> bool {
        self.reject_states.contains(state)
    }

    pub fn is_halting(&self, state: &State) -> bool {
        self.is_accepting(state) || self.is_rejecting(state)
    }

    /// Finds the rule for `(state, symbol)`. When several rules share a key the
    /// first one in insertion order wins.
    pub fn lookup(&self, state: &State, symbol: Symbol) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.matches(state, symbol))
    }

    /// Returns every state mentioned anywhere in the description, sorted.
    pub fn states(&self) -> BTreeSet<State> {
        let mut states: BTreeSet<State> = self
            .transitions
            .iter()
            .flat_map(|t| [t.state.clone(), t.next_state.clone()])
            .collect();
        states.insert(self.start_state.clone());
        states.extend(self.accept_states.iter().cloned());
        states.extend(self.reject_states.iter().cloned());
        states
    }

    /// Returns every symbol read or written by some transition, sorted.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.transitions
            .iter()
            .flat_map(|t| [t.read, t.write])
            .collect()
    }

    /// Converts the description into its interchange form.
    pub fn to_interchange_form(&self) -> InterchangeForm {
        InterchangeForm {
            transitions: self
                .transitions
                .iter()
                .map(|t| {
                    vec![
                        t.state.name().to_string(),
                        t.read.to_string(),
                        t.next_state.name().to_string(),
                        t.write.to_string(),
                        t.direction.token().to_string(),
                    ]
                })
                .collect(),
            start_state: self.start_state.name().to_string(),
            accept_states: names(&self.accept_states),
            reject_states: names(&self.reject_states),
        }
    }

    /// Rebuilds a description from its interchange form.
    ///
    /// # Arguments
    ///
    /// * `form` - The interchange form, typically produced by `to_interchange_form`.
    ///
    /// # Returns
    ///
    /// * `Err(UtmError::MalformedDescription)` if a transition has the wrong arity,
    ///   a symbol is not exactly one character, or a move is not `"L"`/`"R"`.
    /// * `Err(UtmError::ConflictingHaltState)` if the halting sets overlap.
    pub fn from_interchange_form(form: InterchangeForm) -> Result<Self, UtmError> {
        let transitions = form
            .transitions
            .iter()
            .enumerate()
            .map(|(index, fields)| decode_transition(index, fields))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            transitions,
            form.start_state,
            form.accept_states.into_iter().map(State::from),
            form.reject_states.into_iter().map(State::from),
        )
    }

    /// Serializes the description to interchange JSON.
    pub fn encode(&self) -> Result<String, UtmError> {
        serde_json::to_string(&self.to_interchange_form())
            .map_err(|e| UtmError::EncodingError(e.to_string()))
    }

    /// Parses interchange JSON back into a description.
    ///
    /// Missing fields and values of the wrong type are reported as
    /// `UtmError::MalformedDescription`.
    pub fn decode(encoded: &str) -> Result<Self, UtmError> {
        let form: InterchangeForm = serde_json::from_str(encoded)
            .map_err(|e| UtmError::MalformedDescription(e.to_string()))?;

        Self::from_interchange_form(form)
    }
}

fn names(states: &BTreeSet<State>) -> Vec<String> {
    states.iter().map(|s| s.name().to_string()).collect()
}

fn decode_transition(index: usize, fields: &[String]) -> Result<Transition, UtmError> {
    if fields.len() != TRANSITION_ARITY {
        return Err(UtmError::MalformedDescription(format!(
            "Transition {} has {} fields, expected {}",
            index,
            fields.len(),
            TRANSITION_ARITY
        )));
    }

    let direction = Direction::from_token(&fields[4]).ok_or_else(|| {
        UtmError::MalformedDescription(format!(
            "Transition {} has invalid move '{}', expected \"L\" or \"R\"",
            index, fields[4]
        ))
    })?;

    Ok(Transition {
        state: State::new(fields[0].as_str()),
        read: decode_symbol(index, &fields[1])?,
        next_state: State::new(fields[2].as_str()),
        write: decode_symbol(index, &fields[3])?,
        direction,
    })
}

fn decode_symbol(index: usize, field: &str) -> Result<Symbol, UtmError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(UtmError::MalformedDescription(format!(
            "Transition {} has invalid symbol '{}', expected a single character",
            index, field
        ))),
    }
}
