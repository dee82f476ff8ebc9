//! Parameter tables and their expansion into per-job variable sets.

pub mod value;

/// Loading and validating parameter tables.
pub mod table;

/// Turning table rows into jobs.
pub mod expand;
