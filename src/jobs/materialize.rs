use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::JobError;
use crate::manifest::ManifestEntry;
use crate::params::expand::ParamRow;
use crate::template::substitute;

/// What happened to one job directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    /// The directory was created and the manifest written into it.
    Created,
    /// The directory already existed; nothing was touched.
    Skipped,
}

/// Create `job_dir` and fill it with substituted copies of the manifest.
///
/// An existing directory means the job was handled by an earlier run: the
/// call returns `Skipped` without touching anything, which makes re-running
/// a partially-completed batch safe. The existence check is the create
/// itself, so two workers can never both claim the same directory.
///
/// Entries are processed in manifest order and the first failure stops the
/// rest; whatever was already written stays on disk for inspection. Source
/// paths resolve from the process working directory unless absolute, and
/// sources must be UTF-8 text.
pub fn materialize(
    job_dir: &Path,
    manifest: &[ManifestEntry],
    vars: &ParamRow,
) -> Result<Materialization, JobError> {
    match fs::create_dir(job_dir) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && job_dir.is_dir() => {
            info!("{} already exists, skipping", job_dir.display());
            return Ok(Materialization::Skipped);
        }
        Err(err) => {
            return Err(JobError::DirectoryCreate {
                path: job_dir.to_path_buf(),
                source: err,
            })
        }
    }
    info!("copying {} files into {}", manifest.len(), job_dir.display());
    for entry in manifest {
        write_entry(job_dir, entry, vars)?;
    }
    Ok(Materialization::Created)
}

/// Resolve one entry's paths, substitute the content and write it out.
fn write_entry(job_dir: &Path, entry: &ManifestEntry, vars: &ParamRow) -> Result<(), JobError> {
    let source = PathBuf::from(substitute(entry.source(), vars));
    let dest = job_dir.join(substitute(entry.dest(), vars));
    let content = fs::read_to_string(&source).map_err(|err| JobError::SourceRead {
        path: source.clone(),
        source: err,
    })?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|err| JobError::DestinationWrite {
            path: dest.clone(),
            source: err,
        })?;
    }
    info!("writing {}", dest.display());
    fs::write(&dest, substitute(&content, vars)).map_err(|err| JobError::DestinationWrite {
        path: dest,
        source: err,
    })?;
    Ok(())
}
