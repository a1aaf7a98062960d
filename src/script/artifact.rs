use super::definition::ScriptDefinition;
use crate::error::ScriptError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::fs;
use std::path::Path;

impl ScriptDefinition {
    /// Parses a script from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the script with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ScriptError> {
        Ok(encode_to_vec(self, standard())?)
    }

    /// Deserializes a script from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        decode_from_slice(bytes, standard())
            .map(|(script, _)| script) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(ScriptError::from)
    }

    /// Saves the script as a bincode artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScriptError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads a script artifact written by [`ScriptDefinition::save`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }
}
