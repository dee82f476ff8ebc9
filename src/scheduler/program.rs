use std::env;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::NoSubmissionProgramFound;

/// Scheduler commands probed for on `PATH`, in order of preference.
pub const CANDIDATES: [&str; 2] = ["qsub", "sbatch"];

/// The command used to hand a job script to the cluster scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionProgram {
    name: String,
}

impl SubmissionProgram {
    /// Use `name` as the submission program without probing for it.
    pub fn new(name: impl Into<String>) -> Self {
        SubmissionProgram { name: name.into() }
    }

    /// Program name or path, exactly as handed to the process spawner.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probe `PATH` for the first known scheduler command.
    pub fn resolve() -> Result<Self, NoSubmissionProgramFound> {
        let path = env::var_os("PATH").unwrap_or_default();
        Self::resolve_in(&CANDIDATES, &path)
    }

    /// Probe an explicit search path, trying each candidate across every
    /// directory before moving on to the next candidate.
    pub fn resolve_in(candidates: &[&str], path: &OsStr) -> Result<Self, NoSubmissionProgramFound> {
        for candidate in candidates {
            if let Some(found) = find_on_path(candidate, path) {
                info!("found submission program {}", found.display());
                return Ok(SubmissionProgram::new(*candidate));
            }
        }
        Err(NoSubmissionProgramFound {
            tried: candidates.iter().map(|name| name.to_string()).collect(),
        })
    }
}

impl fmt::Display for SubmissionProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn find_on_path(program: &str, path: &OsStr) -> Option<PathBuf> {
    env::split_paths(path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn fake_program(dir: &Path, name: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn candidate_order_beats_path_order() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        // sbatch sits earlier on PATH, but qsub is the preferred candidate
        fake_program(dir_a.path(), "sbatch");
        fake_program(dir_b.path(), "qsub");
        let path = env::join_paths([dir_a.path(), dir_b.path()]).unwrap();

        let program = SubmissionProgram::resolve_in(&CANDIDATES, &path).unwrap();

        assert_eq!(program.name(), "qsub");
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_files_do_not_count() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("qsub"), "not a program").unwrap();
        let path = env::join_paths([dir.path()]).unwrap();

        assert!(SubmissionProgram::resolve_in(&CANDIDATES, &path).is_err());
    }

    #[test]
    fn missing_programs_report_what_was_tried() {
        let dir = TempDir::new().unwrap();
        let path = env::join_paths([dir.path()]).unwrap();

        let err = SubmissionProgram::resolve_in(&CANDIDATES, &path).unwrap_err();

        assert_eq!(err.tried, vec!["qsub".to_string(), "sbatch".to_string()]);
    }
}
