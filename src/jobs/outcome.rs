use crate::error::JobError;

/// Final state of one job after its row was processed.
#[derive(Debug)]
pub enum JobStatus {
    /// The directory already existed, so the row was left alone.
    Skipped,
    /// Directory created and manifest written; submission was not requested.
    Materialized,
    /// Directory created and the script handed to the scheduler.
    Submitted,
    /// This job failed; the rest of the batch kept going.
    Failed(JobError),
}

impl JobStatus {
    /// Short lower-case name used in logs and the batch summary.
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Skipped => "skipped",
            JobStatus::Materialized => "materialized",
            JobStatus::Submitted => "submitted",
            JobStatus::Failed(_) => "failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, JobStatus::Failed(_))
    }
}

/// One job's name and final state.
#[derive(Debug)]
pub struct JobOutcome {
    pub name: String,
    pub status: JobStatus,
}
