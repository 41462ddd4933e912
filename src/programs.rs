use crate::description::MachineDescription;
use crate::types::UtmError;
use tracing::error;

const ERASE_THEN_COPY: &str = include_str!("../machines/erase-then-copy.json");

// Default embedded machine descriptions
const PROGRAM_TEXTS: [(&str, &str); 2] = [
    ("erase-then-copy", ERASE_THEN_COPY),
    ("unary-parity", include_str!("../machines/unary-parity.json")),
];

/// A bundled machine description and the name it is registered under.
#[derive(Debug, Clone)]
pub struct NamedDescription {
    pub name: String,
    pub description: MachineDescription,
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<NamedDescription> = load();
}

fn load() -> Vec<NamedDescription> {
    PROGRAM_TEXTS
        .iter()
        .filter_map(|(name, text)| match MachineDescription::decode(text) {
            Ok(description) => Some(NamedDescription {
                name: name.to_string(),
                description,
            }),
            Err(e) => {
                error!(program = *name, error = %e, "Failed to decode bundled machine");
                None
            }
        })
        .collect()
}

/// The machine over `{0, 1}` that repeatedly erases a leading `00` and a trailing `1`,
/// accepting once the tape is blank.
pub fn erase_then_copy() -> Result<MachineDescription, UtmError> {
    MachineDescription::decode(ERASE_THEN_COPY)
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<MachineDescription, UtmError> {
        PROGRAMS
            .get(index)
            .map(|program| program.description.clone())
            .ok_or_else(|| UtmError::UnknownProgram(format!("index {} out of range", index)))
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<MachineDescription, UtmError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .map(|program| program.description.clone())
            .ok_or_else(|| UtmError::UnknownProgram(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, UtmError> {
        let program = PROGRAMS
            .get(index)
            .ok_or_else(|| UtmError::UnknownProgram(format!("index {} out of range", index)))?;
        let description = &program.description;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            start_state: description.start_state().to_string(),
            state_count: description.states().len(),
            transition_count: description.transitions().len(),
        })
    }
}

/// Summary of a bundled program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}
