//! Find the cluster submission command and feed job scripts to it.

/// Throttled, per-directory submission of job scripts
pub mod dispatch;
/// Locate qsub or sbatch on `PATH`
pub mod program;
