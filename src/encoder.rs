//! This module renders machine descriptions for human inspection: plain transition tables,
//! and a binary-encoded variant where states and symbols are written in binary.
//!
//! Binary encoding:
//! - state `Qn` becomes the binary representation of `n` (`Q0` -> `0`, `Q5` -> `101`)
//! - symbol `0` becomes `0`, symbol `1` becomes `1`, and the blank becomes `10`

use crate::description::MachineDescription;
use crate::types::{State, Symbol, Transition, UtmError, BLANK_SYMBOL};
use std::collections::HashMap;

/// Encodes a state of the form `Q<n>` as the binary representation of `n`.
///
/// # Returns
///
/// * `Err(UtmError::EncodingError)` if the identifier is not `Q` followed by digits.
pub fn binary_encode_state(state: &State) -> Result<String, UtmError> {
    let index = state
        .name()
        .strip_prefix('Q')
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| {
            UtmError::EncodingError(format!("State {} has no binary encoding", state))
        })?;

    Ok(format!("{:b}", index))
}

/// Encodes a symbol of the binary alphabet (`0`, `1`, or the blank).
pub fn binary_encode_symbol(symbol: Symbol) -> Result<String, UtmError> {
    match symbol {
        '0' => Ok("0".to_string()),
        '1' => Ok("1".to_string()),
        BLANK_SYMBOL => Ok("10".to_string()),
        _ => Err(UtmError::EncodingError(format!(
            "Symbol '{}' has no binary encoding",
            symbol
        ))),
    }
}

/// Renders one line per `(state, symbol)` key using identifiers as-is.
pub fn transition_table(description: &MachineDescription) -> Vec<String> {
    rows(description.transitions())
        .into_iter()
        .map(|t| {
            format_row(
                t.state.name(),
                &t.read.to_string(),
                t.next_state.name(),
                &t.write.to_string(),
                t,
            )
        })
        .collect()
}

/// Renders one line per `(state, symbol)` key with binary-encoded states and symbols.
pub fn binary_transition_table(
    description: &MachineDescription,
) -> Result<Vec<String>, UtmError> {
    rows(description.transitions())
        .into_iter()
        .map(|t| {
            Ok(format_row(
                &binary_encode_state(&t.state)?,
                &binary_encode_symbol(t.read)?,
                &binary_encode_state(&t.next_state)?,
                &binary_encode_symbol(t.write)?,
                t,
            ))
        })
        .collect()
}

/// Summarizes the start and accept states.
pub fn machine_details(description: &MachineDescription) -> String {
    let accept: Vec<&str> = description
        .accept_states()
        .iter()
        .map(|s| s.name())
        .collect();

    format!(
        "Start State: {}\nAccept States: {:?}",
        description.start_state(),
        accept
    )
}

/// Collapses transitions into one row per `(state, symbol)` key. A later transition
/// replaces an earlier one with the same key but keeps the earlier row position.
fn rows(transitions: &[Transition]) -> Vec<&Transition> {
    let mut positions: HashMap<(&State, Symbol), usize> = HashMap::new();
    let mut rows: Vec<&Transition> = Vec::new();

    for transition in transitions {
        match positions.get(&(&transition.state, transition.read)) {
            Some(&index) => rows[index] = transition,
            None => {
                positions.insert((&transition.state, transition.read), rows.len());
                rows.push(transition);
            }
        }
    }

    rows
}

fn format_row(state: &str, read: &str, next: &str, write: &str, t: &Transition) -> String {
    format!(
        "Current State: {}, Read Symbol: {} => Next State: {}, Write Symbol: {}, Move: {}",
        state, read, next, write, t.direction
    )
}
