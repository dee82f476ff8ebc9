//! Expand a parameter table into per-job directories, fill each directory
//! with variable-substituted copies of a file manifest, and hand every new
//! job to the cluster scheduler.
//!
//! Job directories double as the completion record: a directory that
//! already exists is skipped untouched, so a batch can be re-run after
//! adding rows or fixing a broken job and only the new work happens.
//!
//! ```no_run
//! use std::time::Duration;
//! use sower::{batch, Config, ManifestEntry, ParameterTable, Separator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = ParameterTable::from_delimited("temp\n300\n350\n", &Separator::default())?;
//! let manifest = vec![
//!     ManifestEntry::Copy("sub.sh".to_string()),
//!     "params.in:in.dat".parse()?,
//! ];
//! let config = Config {
//!     pause: Duration::from_secs(5),
//!     ..Config::default()
//! };
//! let report = batch::run(&table, &manifest, &config)?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

/// Sweep a whole table through materialization and submission
pub mod batch;
pub mod config;
pub mod error;
/// Create and populate one job directory
pub mod jobs;
/// The list of files every job directory receives
pub mod manifest;
/// Parameter tables and their expansion into jobs
pub mod params;
/// Scheduler discovery and throttled submission
pub mod scheduler;
/// `{name}` placeholder substitution
pub mod template;

pub use batch::{BatchReport, Tally};
pub use config::Config;
pub use error::{JobError, NoSubmissionProgramFound, TableError};
pub use jobs::materialize::Materialization;
pub use jobs::outcome::{JobOutcome, JobStatus};
pub use manifest::ManifestEntry;
pub use params::expand::{Job, ParamRow, JOB_NAME};
pub use params::table::{ParameterTable, Separator};
pub use params::value::Scalar;
pub use scheduler::dispatch::Dispatcher;
pub use scheduler::program::SubmissionProgram;
