use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::TableError;
use crate::params::table::{ParameterTable, Separator};

/// Script name handed to the scheduler when nothing else is configured.
pub const DEFAULT_SCRIPT: &str = "sub.sh";

/// Everything a batch run needs besides the table and the manifest.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the job directories are created under.
    pub base_dir: PathBuf,
    /// Column separator pattern for delimited tables; `None` splits on any
    /// run of whitespace.
    pub separator: Option<String>,
    /// Template for the script name handed to the submission program.
    pub script: String,
    /// Submission program override; `None` probes `PATH` for a scheduler.
    pub program: Option<String>,
    /// Minimum spacing between consecutive submission attempts.
    pub pause: Duration,
    /// When false, materialize directories only and never submit.
    pub submit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_dir: PathBuf::from("."),
            separator: None,
            script: DEFAULT_SCRIPT.to_string(),
            program: None,
            pause: Duration::ZERO,
            submit: true,
        }
    }
}

impl Config {
    /// Compile the configured separator, or the whitespace default.
    pub fn separator(&self) -> Result<Separator, TableError> {
        match &self.separator {
            Some(pattern) => Separator::new(pattern),
            None => Ok(Separator::default()),
        }
    }

    /// Read the parameter table at `path` with the configured separator.
    pub fn load_table(&self, path: &Path) -> Result<ParameterTable, TableError> {
        ParameterTable::from_path(path, &self.separator()?)
    }
}
