//! This crate provides the core logic for a Universal Turing Machine simulator.
//! It includes modules for describing single-tape machines, encoding and decoding those
//! descriptions, executing them on a tape, and rendering their transition tables.

pub mod description;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod types;
pub mod universal;

/// Re-exports the `MachineDescription` struct and its `InterchangeForm`.
pub use description::{InterchangeForm, MachineDescription};
/// Re-exports the presentation helpers from the encoder module.
pub use encoder::{
    binary_encode_state, binary_encode_symbol, binary_transition_table, transition_table,
};
/// Re-exports the `DescriptionLoader` struct from the loader module.
pub use loader::DescriptionLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the core types from the types module.
pub use types::{Direction, State, Status, Step, Symbol, Transition, UtmError, BLANK_SYMBOL};
/// Re-exports the `UniversalTuringMachine` facade.
pub use universal::UniversalTuringMachine;
