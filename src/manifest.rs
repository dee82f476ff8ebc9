//! The caller-supplied list of files copied into every job directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One file to place in each job directory.
///
/// Source and destination are template strings; the destination is
/// relative to the job directory. In a JSON manifest an entry is either
/// `"path"` or `["source", "dest"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    /// Copy a file under the same relative path.
    Copy(String),
    /// Copy a file to a different destination.
    CopyAs(String, String),
}

impl ManifestEntry {
    /// Template string naming the file to read.
    pub fn source(&self) -> &str {
        match self {
            ManifestEntry::Copy(path) => path,
            ManifestEntry::CopyAs(source, _) => source,
        }
    }

    /// Template string naming the destination, relative to the job
    /// directory.
    pub fn dest(&self) -> &str {
        match self {
            ManifestEntry::Copy(path) => path,
            ManifestEntry::CopyAs(_, dest) => dest,
        }
    }
}

/// `SRC` or `SRC:DEST`, the CLI spelling of an entry.
impl FromStr for ManifestEntry {
    type Err = ManifestParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once(':') {
            None if raw.is_empty() => Err(ManifestParseError(raw.to_string())),
            None => Ok(ManifestEntry::Copy(raw.to_string())),
            Some((source, dest)) if source.is_empty() || dest.is_empty() => {
                Err(ManifestParseError(raw.to_string()))
            }
            Some((source, dest)) => Ok(ManifestEntry::CopyAs(source.to_string(), dest.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("manifest entries look like SRC or SRC:DEST, got `{0}`")]
pub struct ManifestParseError(String);

/// Failure to load a JSON manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("can't read manifest {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("manifest is not a JSON list of entries: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a JSON manifest file: an array of `"path"` strings and
/// `["source", "dest"]` pairs.
pub fn load(path: &Path) -> Result<Vec<ManifestEntry>, ManifestError> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
