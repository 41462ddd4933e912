//! This module defines the `TuringMachine` struct, the execution engine that runs a
//! borrowed `MachineDescription` over its own `Tape` until a halting state is reached.

use crate::description::MachineDescription;
use crate::tape::Tape;
use crate::types::{State, Status, Step, Transition, UtmError, BLANK_SYMBOL};
use tracing::{debug, trace};

/// A single run of a machine description over one input.
///
/// The engine owns its tape and current state; the description is only read.
pub struct TuringMachine<'a> {
    description: &'a MachineDescription,
    input: String,
    tape: Tape,
    state: State,
    status: Status,
    step_count: usize,
}

impl<'a> TuringMachine<'a> {
    /// Creates a new `TuringMachine` in the description's start state, with the head
    /// on the first cell of `input`.
    ///
    /// If the start state is itself a halting state the machine starts halted.
    ///
    /// # Arguments
    ///
    /// * `description` - The machine to run; it is borrowed, never modified.
    /// * `input` - The initial tape contents, followed by one blank cell.
    pub fn new(description: &'a MachineDescription, input: &str) -> Self {
        let state = description.start_state().clone();
        let status = classify(description, &state);

        Self {
            description,
            input: input.to_string(),
            tape: Tape::new(input, BLANK_SYMBOL),
            state,
            status,
            step_count: 0,
        }
    }

    /// Executes a single step of the computation.
    ///
    /// Reads the symbol under the head and applies the first matching rule. When no
    /// rule applies the machine rejects in its current state instead of failing.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule was applied and the new state is not halting.
    /// * `Step::Halt(status)` once the machine is accepted or rejected. Stepping a
    ///   halted machine leaves it unchanged.
    pub fn step(&mut self) -> Step {
        if self.status.is_halted() {
            return Step::Halt(self.status.clone());
        }

        let description = self.description;
        let symbol = self.tape.current();
        let Some(transition) = description.lookup(&self.state, symbol) else {
            debug!(
                state = %self.state,
                symbol = %symbol,
                "No transition defined, rejecting"
            );
            self.status = Status::Rejected(self.state.clone());
            return Step::Halt(self.status.clone());
        };

        self.tape.set_current(transition.write);
        self.tape.move_head(transition.direction);
        self.state = transition.next_state.clone();
        self.step_count += 1;

        trace!(
            step = self.step_count,
            read = %symbol,
            write = %transition.write,
            direction = %transition.direction,
            state = %self.state,
            "Applied transition"
        );

        self.status = classify(self.description, &self.state);
        match &self.status {
            Status::Running => Step::Continue,
            status => {
                debug!(steps = self.step_count, ?status, "Machine halted");
                Step::Halt(status.clone())
            }
        }
    }

    /// Runs the machine until it halts and returns `true` iff it accepted.
    ///
    /// There is no step ceiling: a machine that never reaches a halting state keeps
    /// running. Use `run_with_limit` for bounded execution.
    pub fn run(&mut self) -> bool {
        loop {
            if let Step::Halt(status) = self.step() {
                return status.is_accepted();
            }
        }
    }

    /// Runs the machine for at most `max_steps` applied transitions.
    ///
    /// Reaching the limit is only an error if another rule would still apply; a machine
    /// that is stuck after exactly `max_steps` transitions rejects as `run` would.
    ///
    /// # Arguments
    ///
    /// * `max_steps` - The number of transitions the machine may apply.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` for an accepted / rejected verdict.
    /// * `Err(UtmError::StepLimitExceeded)` if the machine is still running.
    pub fn run_with_limit(&mut self, max_steps: usize) -> Result<bool, UtmError> {
        while !self.status.is_halted() {
            if self.step_count >= max_steps && self.transition().is_some() {
                return Err(UtmError::StepLimitExceeded(max_steps));
            }
            self.step();
        }

        Ok(self.status.is_accepted())
    }

    /// Finds the rule that the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.description.lookup(&self.state, self.tape.current())
    }

    /// Returns the current control state.
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the total number of transitions applied.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn description(&self) -> &MachineDescription {
        self.description
    }

    /// Resets the machine to its initial configuration on the original input.
    pub fn reset(&mut self) {
        self.state = self.description.start_state().clone();
        self.status = classify(self.description, &self.state);
        self.tape = Tape::new(&self.input, BLANK_SYMBOL);
        self.step_count = 0;
    }
}

fn classify(description: &MachineDescription, state: &State) -> Status {
    if description.is_accepting(state) {
        Status::Accepted(state.clone())
    } else if description.is_rejecting(state) {
        Status::Rejected(state.clone())
    } else {
        Status::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn erase_then_copy() -> MachineDescription {
        crate::programs::erase_then_copy().unwrap()
    }

    /// Walks right over 1s and accepts on the first blank; rejects on 0 via the reject state.
    fn create_scanner() -> MachineDescription {
        MachineDescription::new(
            vec![
                Transition::new("scan", '1', "scan", '1', Direction::Right),
                Transition::new("scan", '0', "bad", '0', Direction::Right),
                Transition::new("scan", BLANK_SYMBOL, "done", BLANK_SYMBOL, Direction::Right),
            ],
            "scan",
            [State::new("done")],
            [State::new("bad")],
        )
        .unwrap()
    }

    #[test]
    fn test_machine_creation() {
        let description = create_scanner();
        let machine = TuringMachine::new(&description, "11");

        assert_eq!(machine.state(), &State::new("scan"));
        assert_eq!(machine.status(), &Status::Running);
        assert_eq!(machine.tape().head(), 0);
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_single_step() {
        let description = create_scanner();
        let mut machine = TuringMachine::new(&description, "11");

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(machine.tape().head(), 1);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_run_accepts() {
        let description = create_scanner();
        let mut machine = TuringMachine::new(&description, "111");

        assert!(machine.run());
        assert_eq!(machine.status(), &Status::Accepted(State::new("done")));
        assert_eq!(machine.step_count(), 4);
    }

    #[test]
    fn test_run_rejects_via_reject_state() {
        let description = create_scanner();
        let mut machine = TuringMachine::new(&description, "101");

        assert!(!machine.run());
        assert_eq!(machine.status(), &Status::Rejected(State::new("bad")));
    }

    #[test]
    fn test_undefined_transition_rejects_within_one_step() {
        let description = create_scanner();
        let mut machine = TuringMachine::new(&description, "x");

        let step = machine.step();

        assert_eq!(step, Step::Halt(Status::Rejected(State::new("scan"))));
        assert_eq!(machine.step_count(), 0);
        // the stuck state was never declared as a reject state
        assert!(!description.is_rejecting(&State::new("scan")));
        assert!(!machine.run());
    }

    #[test]
    fn test_halted_machine_does_not_step() {
        let description = create_scanner();
        let mut machine = TuringMachine::new(&description, "");

        assert!(machine.run());
        let tape_before = machine.tape().clone();

        assert_eq!(
            machine.step(),
            Step::Halt(Status::Accepted(State::new("done")))
        );
        assert_eq!(machine.tape(), &tape_before);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_start_state_already_accepting() {
        let description =
            MachineDescription::new(Vec::new(), "Q0", [State::new("Q0")], []).unwrap();
        let mut machine = TuringMachine::new(&description, "1");

        assert!(machine.status().is_accepted());
        assert!(machine.run());
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_left_growth_keeps_cell_content() {
        let description = MachineDescription::new(
            vec![Transition::new("Q0", '1', "Q1", 'x', Direction::Left)],
            "Q0",
            [State::new("Q1")],
            [],
        )
        .unwrap();
        let mut machine = TuringMachine::new(&description, "1");

        machine.step();

        let tape = machine.tape();
        assert_eq!(tape.cells().collect::<String>(), "BxB");
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.current(), BLANK_SYMBOL);
        assert_eq!(tape.read(tape.head() + 1), 'x');
        assert_eq!(tape.position(), -1);
    }

    #[test]
    fn test_erase_then_copy_accepts_empty_input() {
        let description = erase_then_copy();
        let mut machine = TuringMachine::new(&description, "");

        assert_eq!(
            machine.step(),
            Step::Halt(Status::Accepted(State::new("Q5")))
        );
        assert_eq!(machine.step_count(), 1);
        assert!(machine.run());
    }

    #[test]
    fn test_erase_then_copy_on_input() {
        let description = erase_then_copy();

        // 00 1: erase a pair of 0s and the trailing 1, then accept on the blank
        let mut machine = TuringMachine::new(&description, "001");
        assert!(machine.run());
        assert_eq!(machine.tape().contents(), "");

        // a lone 0 has no rule in Q1 on blank
        let mut machine = TuringMachine::new(&description, "0");
        assert!(!machine.run());
        assert_eq!(machine.status(), &Status::Rejected(State::new("Q1")));
    }

    #[test]
    fn test_determinism() {
        let description = erase_then_copy();

        let outcomes: Vec<(bool, String, usize)> = (0..3)
            .map(|_| {
                let mut machine = TuringMachine::new(&description, "000111");
                let verdict = machine.run();
                (verdict, machine.tape().to_string(), machine.step_count())
            })
            .collect();

        assert!(outcomes.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_run_with_limit() {
        let looping = MachineDescription::new(
            vec![Transition::new("Q0", BLANK_SYMBOL, "Q0", BLANK_SYMBOL, Direction::Right)],
            "Q0",
            [State::new("Q1")],
            [],
        )
        .unwrap();
        let mut machine = TuringMachine::new(&looping, "");

        assert_eq!(
            machine.run_with_limit(50),
            Err(UtmError::StepLimitExceeded(50))
        );
        assert_eq!(machine.step_count(), 50);

        let description = create_scanner();
        let mut machine = TuringMachine::new(&description, "11");
        assert_eq!(machine.run_with_limit(3), Ok(true));
    }

    #[test]
    fn test_run_with_limit_matches_run_when_stuck_at_limit() {
        let description = erase_then_copy();

        for input in ["", "0", "001", "000111", "1"] {
            let mut unbounded = TuringMachine::new(&description, input);
            let verdict = unbounded.run();
            let steps = unbounded.step_count();

            let mut bounded = TuringMachine::new(&description, input);
            assert_eq!(bounded.run_with_limit(steps), Ok(verdict), "input {:?}", input);
            assert_eq!(bounded.status(), unbounded.status());
        }

        // "0" applies one transition, then has no rule in Q1 on blank
        let mut machine = TuringMachine::new(&description, "0");
        assert_eq!(machine.run_with_limit(1), Ok(false));
        assert_eq!(machine.status(), &Status::Rejected(State::new("Q1")));
    }

    #[test]
    fn test_transition_peeks_next_rule() {
        let description = erase_then_copy();
        let mut machine = TuringMachine::new(&description, "0");

        assert_eq!(
            machine.transition().map(|t| t.next_state.clone()),
            Some(State::new("Q1"))
        );
        machine.step();
        assert!(machine.transition().is_none());
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_reset() {
        let description = create_scanner();
        let mut machine = TuringMachine::new(&description, "10");

        machine.run();
        assert!(machine.status().is_halted());

        machine.reset();
        assert_eq!(machine.state(), &State::new("scan"));
        assert_eq!(machine.status(), &Status::Running);
        assert_eq!(machine.tape().cells().collect::<String>(), "10B");
        assert_eq!(machine.step_count(), 0);
    }
}
