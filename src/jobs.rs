//! Turn one parameter row into a populated job directory and record how it
//! went.

/// Create job directories and write substituted manifest files into them
pub mod materialize;
/// Per-job result types reported back to the batch summary
pub mod outcome;
