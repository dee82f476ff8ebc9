//! Error types for batch-fatal conditions and per-job failures.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The parameter source can't be interpreted as a rectangular table.
///
/// Raised by the `ParameterTable` constructors, so an invalid source never
/// reaches the batch loop. Batch-fatal at the CLI.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("can't read parameter table {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("parameter table is not a JSON column map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field separator `{pattern}`: {source}")]
    Separator { pattern: String, source: regex::Error },

    #[error("parameter table has no columns")]
    Empty,

    #[error("line {line} has {found} fields, expected {expected}")]
    RaggedRow { line: usize, expected: usize, found: usize },

    #[error("column `{column}` has {found} values, expected {expected}")]
    RaggedColumn { column: String, expected: usize, found: usize },
}

/// A failure scoped to one job. The batch records it and carries on with
/// the next job; nothing here aborts the sweep.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("can't create job directory {}: {source}", .path.display())]
    DirectoryCreate { path: PathBuf, source: io::Error },

    #[error("can't read source file {}: {source}", .path.display())]
    SourceRead { path: PathBuf, source: io::Error },

    #[error("can't write {}: {source}", .path.display())]
    DestinationWrite { path: PathBuf, source: io::Error },

    #[error("can't launch submission program `{program}`: {source}")]
    SubmitLaunch { program: String, source: io::Error },

    #[error("`{program} {script}` in {} exited with {status}: {stderr}", .dir.display())]
    SubmitFailed {
        program: String,
        script: String,
        dir: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

/// None of the candidate scheduler commands exist on the search path.
/// Batch-fatal, raised before any job is touched.
#[derive(Debug, Error)]
#[error("no submission program found on PATH (tried: {})", .tried.join(", "))]
pub struct NoSubmissionProgramFound {
    pub tried: Vec<String>,
}
