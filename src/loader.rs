//! This module provides the `DescriptionLoader` struct, responsible for loading machine
//! descriptions in interchange JSON from files, directories, and strings.

use crate::description::MachineDescription;
use crate::types::{UtmError, MAX_DESCRIPTION_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of machine description files.
const DESCRIPTION_EXTENSION: &str = "json";

/// `DescriptionLoader` is a utility struct for loading machine descriptions.
pub struct DescriptionLoader;

impl DescriptionLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.json` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDescription)` if the file is read and decoded.
    /// * `Err(UtmError::FileError)` if the file cannot be read or exceeds `MAX_DESCRIPTION_SIZE`.
    /// * `Err(UtmError::MalformedDescription)` if the content is not a valid description.
    pub fn load_description(path: &Path) -> Result<MachineDescription, UtmError> {
        let metadata = fs::metadata(path).map_err(|e| {
            UtmError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if metadata.len() > MAX_DESCRIPTION_SIZE as u64 {
            return Err(UtmError::FileError(format!(
                "File {} is {} bytes, larger than the {} byte limit",
                path.display(),
                metadata.len(),
                MAX_DESCRIPTION_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            UtmError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Loading machine description");
        MachineDescription::decode(&content)
    }

    /// Loads a single machine description from interchange JSON text.
    ///
    /// # Arguments
    ///
    /// * `content` - A string slice containing the interchange JSON.
    pub fn load_description_from_string(content: &str) -> Result<MachineDescription, UtmError> {
        MachineDescription::decode(content)
    }

    /// Loads every `.json` description in a directory.
    ///
    /// Directories and files with other extensions are skipped. Each element of the
    /// result is either the path with its description or the error for that file.
    ///
    /// # Arguments
    ///
    /// * `directory` - A reference to the `Path` of the directory to scan.
    pub fn load_descriptions(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDescription), UtmError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(UtmError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(UtmError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != DESCRIPTION_EXTENSION)
                {
                    return None;
                }

                Some(Self::load_description(&path).map(|description| (path, description)))
            })
            .collect()
    }
}
