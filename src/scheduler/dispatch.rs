use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::error::JobError;
use crate::params::expand::ParamRow;
use crate::scheduler::program::SubmissionProgram;
use crate::template::substitute;

/// Hands materialized jobs to the scheduler one at a time, pacing
/// consecutive attempts by the configured pause.
#[derive(Debug)]
pub struct Dispatcher {
    program: SubmissionProgram,
    script_template: String,
    pause: Duration,
    last_attempt: Option<Instant>,
}

impl Dispatcher {
    pub fn new(
        program: SubmissionProgram,
        script_template: impl Into<String>,
        pause: Duration,
    ) -> Self {
        Dispatcher {
            program,
            script_template: script_template.into(),
            pause,
            last_attempt: None,
        }
    }

    /// Submit one job: resolve the script name from the row, run the
    /// submission program inside `job_dir` and log the scheduler's reply.
    ///
    /// The script is passed as a plain argument and `job_dir` becomes the
    /// child's working directory; no shell is involved, so parameter values
    /// holding shell metacharacters are inert. The call sleeps first until
    /// the pause has elapsed since the previous attempt started, and a
    /// failed attempt arms the pause just like a successful one.
    pub fn submit(&mut self, job_dir: &Path, vars: &ParamRow) -> Result<(), JobError> {
        self.throttle();
        let script = substitute(&self.script_template, vars);
        info!("submitting {} in {}", script, job_dir.display());
        self.last_attempt = Some(Instant::now());
        let output = Command::new(self.program.name())
            .arg(&script)
            .current_dir(job_dir)
            .output()
            .map_err(|err| JobError::SubmitLaunch {
                program: self.program.name().to_string(),
                source: err,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(JobError::SubmitFailed {
                program: self.program.name().to_string(),
                script,
                dir: job_dir.to_path_buf(),
                status: output.status,
                stderr: if stderr.is_empty() {
                    "no stderr output".to_string()
                } else {
                    stderr
                },
            });
        }
        let response = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !response.is_empty() {
            info!("scheduler response: {response}");
        }
        Ok(())
    }

    fn throttle(&self) {
        if self.pause.is_zero() {
            return;
        }
        if let Some(previous) = self.last_attempt {
            let since = previous.elapsed();
            if since < self.pause {
                thread::sleep(self.pause - since);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_a_launch_error() {
        let dir = TempDir::new().unwrap();
        let program = SubmissionProgram::new("definitely-not-a-scheduler");
        let mut dispatcher = Dispatcher::new(program, "sub.sh", Duration::ZERO);

        let err = dispatcher.submit(dir.path(), &ParamRow::new()).unwrap_err();

        assert!(matches!(err, JobError::SubmitLaunch { .. }));
    }

    #[test]
    fn failed_attempts_still_arm_the_pause() {
        let dir = TempDir::new().unwrap();
        let program = SubmissionProgram::new("definitely-not-a-scheduler");
        let mut dispatcher = Dispatcher::new(program, "sub.sh", Duration::from_millis(60));

        let start = Instant::now();
        dispatcher.submit(dir.path(), &ParamRow::new()).unwrap_err();
        dispatcher.submit(dir.path(), &ParamRow::new()).unwrap_err();

        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
