use std::fmt;

use chrono::{DateTime, Utc};
use log::{error, info};

use crate::config::Config;
use crate::error::NoSubmissionProgramFound;
use crate::jobs::materialize::{materialize, Materialization};
use crate::jobs::outcome::{JobOutcome, JobStatus};
use crate::manifest::ManifestEntry;
use crate::params::expand::{expand, Job};
use crate::params::table::ParameterTable;
use crate::scheduler::dispatch::Dispatcher;
use crate::scheduler::program::SubmissionProgram;

/// What happened to every job in one sweep over the table.
#[derive(Debug)]
pub struct BatchReport {
    /// When the sweep started.
    pub started: DateTime<Utc>,
    /// Per-job results, in table order.
    pub outcomes: Vec<JobOutcome>,
}

/// Counts of jobs per final state. The states are exclusive: a submitted
/// job is not also counted as materialized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub skipped: usize,
    pub materialized: usize,
    pub submitted: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for outcome in &self.outcomes {
            match outcome.status {
                JobStatus::Skipped => tally.skipped += 1,
                JobStatus::Materialized => tally.materialized += 1,
                JobStatus::Submitted => tally.submitted += 1,
                JobStatus::Failed(_) => tally.failed += 1,
            }
        }
        tally
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tally = self.tally();
        write!(
            f,
            "{} jobs: {} skipped, {} materialized, {} submitted, {} failed",
            self.outcomes.len(),
            tally.skipped,
            tally.materialized,
            tally.submitted,
            tally.failed
        )
    }
}

/// Expand the table and drive every row through materialization and, when
/// enabled, submission.
///
/// Fails up front when submission is requested and no scheduler command can
/// be found. Per-job failures are recorded in the report and never stop the
/// rest of the sweep.
pub fn run(
    table: &ParameterTable,
    manifest: &[ManifestEntry],
    config: &Config,
) -> Result<BatchReport, NoSubmissionProgramFound> {
    let started = Utc::now();
    info!("batch started at {started}");
    let jobs = expand(table);
    info!("expanded parameter table into {} jobs", jobs.len());

    let mut dispatcher = match (config.submit, &config.program) {
        (false, _) => None,
        (true, Some(name)) => Some(SubmissionProgram::new(name)),
        (true, None) => Some(SubmissionProgram::resolve()?),
    }
    .map(|program| Dispatcher::new(program, &config.script, config.pause));

    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in &jobs {
        let status = run_job(job, manifest, config, dispatcher.as_mut());
        match &status {
            JobStatus::Failed(err) => error!("{}: {err}", job.name),
            status => info!("{}: {}", job.name, status.label()),
        }
        outcomes.push(JobOutcome {
            name: job.name.clone(),
            status,
        });
    }

    Ok(BatchReport { started, outcomes })
}

fn run_job(
    job: &Job,
    manifest: &[ManifestEntry],
    config: &Config,
    dispatcher: Option<&mut Dispatcher>,
) -> JobStatus {
    let job_dir = config.base_dir.join(&job.name);
    match materialize(&job_dir, manifest, &job.vars) {
        Ok(Materialization::Skipped) => JobStatus::Skipped,
        Ok(Materialization::Created) => match dispatcher {
            None => JobStatus::Materialized,
            Some(dispatcher) => match dispatcher.submit(&job_dir, &job.vars) {
                Ok(()) => JobStatus::Submitted,
                Err(err) => JobStatus::Failed(err),
            },
        },
        Err(err) => JobStatus::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;

    fn outcome(name: &str, status: JobStatus) -> JobOutcome {
        JobOutcome {
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn tally_counts_each_state_once() {
        let report = BatchReport {
            started: Utc::now(),
            outcomes: vec![
                outcome("0", JobStatus::Skipped),
                outcome("1", JobStatus::Submitted),
                outcome("2", JobStatus::Submitted),
                outcome(
                    "3",
                    JobStatus::Failed(JobError::SourceRead {
                        path: "x.in".into(),
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    }),
                ),
            ],
        };
        assert_eq!(
            report.tally(),
            Tally {
                skipped: 1,
                materialized: 0,
                submitted: 2,
                failed: 1,
            }
        );
        assert_eq!(
            report.to_string(),
            "4 jobs: 1 skipped, 0 materialized, 2 submitted, 1 failed"
        );
    }
}
