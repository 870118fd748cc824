//! Loading recordings from JSON into a [`ReplayDocument`].

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::document::ReplayDocument;

/// Errors from loading or validating a recording.
///
/// A load error leaves no partial document installed; the caller keeps
/// whatever document it had before.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read recording: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed recording JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate object id {id} in recording")]
    DuplicateObjectId { id: u32 },
}

impl ReplayDocument {
    /// Parse a recording from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let document: ReplayDocument = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Parse a recording from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let document: ReplayDocument = serde_json::from_reader(reader)?;
        document.validate()?;
        Ok(document)
    }

    /// Load a recording from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Check document-level invariants.
    ///
    /// Field-level defects (missing fields, unknown state ids) are handled
    /// by defaults and drops downstream; only duplicate descriptor ids make
    /// a document unusable, since id lookup would be ambiguous.
    pub fn validate(&self) -> Result<(), LoadError> {
        let mut seen = std::collections::HashSet::with_capacity(self.objects.len());
        for object in &self.objects {
            if !seen.insert(object.id) {
                return Err(LoadError::DuplicateObjectId { id: object.id });
            }
        }
        Ok(())
    }
}
