//! This module provides `UniversalTuringMachine`, which pairs a machine description with an
//! input and exposes running the machine alongside encoding and decoding its description.

use crate::description::MachineDescription;
use crate::machine::TuringMachine;
use crate::types::UtmError;
use rayon::prelude::*;
use tracing::debug;

/// A machine description together with the input it runs on.
#[derive(Debug, Clone)]
pub struct UniversalTuringMachine {
    description: MachineDescription,
    input: String,
}

impl UniversalTuringMachine {
    pub fn new(description: MachineDescription, input: impl Into<String>) -> Self {
        Self {
            description,
            input: input.into(),
        }
    }

    pub fn description(&self) -> &MachineDescription {
        &self.description
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Creates a fresh engine over the stored input, for callers that want to step it.
    pub fn machine(&self) -> TuringMachine<'_> {
        TuringMachine::new(&self.description, &self.input)
    }

    /// Runs the machine to completion and returns `true` iff it accepted.
    pub fn run(&self) -> bool {
        self.machine().run()
    }

    /// Runs independent simulations of the description over each input in parallel on
    /// the rayon thread pool.
    ///
    /// Verdicts are returned in input order. Every run borrows the same description,
    /// which is never mutated.
    ///
    /// # Arguments
    ///
    /// * `inputs` - One initial tape per run.
    pub fn run_many<S: AsRef<str> + Sync>(&self, inputs: &[S]) -> Vec<bool> {
        debug!(runs = inputs.len(), "Running batch");

        inputs
            .par_iter()
            .map(|input| TuringMachine::new(&self.description, input.as_ref()).run())
            .collect()
    }

    /// Serializes the description to interchange JSON.
    pub fn encode_description(&self) -> Result<String, UtmError> {
        self.description.encode()
    }

    /// Parses interchange JSON into a description.
    pub fn decode_description(encoded: &str) -> Result<MachineDescription, UtmError> {
        MachineDescription::decode(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::erase_then_copy;
    use crate::types::{State, BLANK_SYMBOL};

    #[test]
    fn test_run_empty_input_accepts() {
        let utm = UniversalTuringMachine::new(erase_then_copy().unwrap(), "");

        assert!(utm.run());
        // running twice starts from a fresh tape
        assert!(utm.run());
    }

    #[test]
    fn test_machine_steps_stored_input() {
        let utm = UniversalTuringMachine::new(erase_then_copy().unwrap(), "0");
        let machine = utm.machine();

        assert_eq!(machine.tape().current(), '0');
        assert_eq!(machine.state(), &State::new("Q0"));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let utm = UniversalTuringMachine::new(erase_then_copy().unwrap(), "");

        let encoded = utm.encode_description().unwrap();
        let decoded = UniversalTuringMachine::decode_description(&encoded).unwrap();

        assert_eq!(&decoded, utm.description());
        assert_eq!(
            decoded.lookup(&State::new("Q0"), BLANK_SYMBOL).unwrap().next_state,
            State::new("Q5")
        );
        assert!(decoded.is_accepting(&State::new("Q5")));
        assert!(decoded.is_rejecting(&State::new("Reject")));
    }

    #[test]
    fn test_decode_malformed() {
        let result = UniversalTuringMachine::decode_description(r#"{"transitions": []}"#);

        assert!(matches!(result, Err(UtmError::MalformedDescription(_))));
    }

    #[test]
    fn test_run_many_matches_sequential_runs() {
        let utm = UniversalTuringMachine::new(erase_then_copy().unwrap(), "");
        let inputs = ["", "0", "001", "000111", "1"];

        let parallel = utm.run_many(&inputs);
        let sequential: Vec<bool> = inputs
            .iter()
            .map(|input| TuringMachine::new(utm.description(), input).run())
            .collect();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel, vec![true, false, true, false, false]);
    }

    #[test]
    fn test_run_many_large_batch() {
        let utm = UniversalTuringMachine::new(erase_then_copy().unwrap(), "");
        let inputs: Vec<String> = (0..20_000)
            .map(|i| if i % 2 == 0 { String::new() } else { "0".to_string() })
            .collect();

        let verdicts = utm.run_many(&inputs);

        assert_eq!(verdicts.len(), inputs.len());
        assert!(verdicts.iter().enumerate().all(|(i, &v)| v == (i % 2 == 0)));
    }
}
