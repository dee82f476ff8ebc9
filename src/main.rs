use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use sower::config::DEFAULT_SCRIPT;
use sower::{batch, manifest, Config, ManifestEntry};

/// Expand a parameter table into job directories and submit each new job to
/// the cluster scheduler.
#[derive(Parser, Debug)]
#[command(name = "sower", version)]
#[command(about = "Create and submit cluster jobs from a parameter table")]
struct Args {
    /// Parameter table: delimited text, or a .json column map
    table: PathBuf,

    /// File to copy into every job directory, as SRC or SRC:DEST;
    /// repeatable, both halves may hold {placeholders}
    #[arg(short = 'f', long = "file", value_name = "SRC[:DEST]")]
    files: Vec<ManifestEntry>,

    /// JSON manifest of files to copy, appended after --file entries
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Directory the job directories are created under
    #[arg(long, default_value = ".", value_name = "DIR")]
    base_dir: PathBuf,

    /// Regex that splits table columns (default: any run of whitespace)
    #[arg(long, value_name = "REGEX")]
    separator: Option<String>,

    /// Script name handed to the submission program, may hold {placeholders}
    #[arg(long, default_value = DEFAULT_SCRIPT, value_name = "NAME")]
    script: String,

    /// Submission command to use instead of probing PATH for qsub/sbatch
    #[arg(long, value_name = "PROGRAM")]
    program: Option<String>,

    /// Seconds to wait between consecutive submissions
    #[arg(long, default_value_t = 0.0, value_name = "SECONDS")]
    pause_seconds: f64,

    /// Create and populate job directories but never submit
    #[arg(long)]
    no_submit: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let pause = Duration::try_from_secs_f64(args.pause_seconds)
        .context("--pause-seconds must be a non-negative number of seconds")?;

    let mut entries = args.files;
    if let Some(path) = &args.manifest {
        entries.extend(
            manifest::load(path)
                .with_context(|| format!("can't load manifest {}", path.display()))?,
        );
    }
    if entries.is_empty() {
        warn!("no files to copy, job directories will be created empty");
    }

    let config = Config {
        base_dir: args.base_dir,
        separator: args.separator,
        script: args.script,
        program: args.program,
        pause,
        submit: !args.no_submit,
    };

    fs::create_dir_all(&config.base_dir)
        .with_context(|| format!("can't create base directory {}", config.base_dir.display()))?;

    info!("reading parameter table {}", args.table.display());
    let table = config
        .load_table(&args.table)
        .with_context(|| format!("can't load parameter table {}", args.table.display()))?;

    let report = batch::run(&table, &entries, &config)?;
    println!("{report}");
    Ok(())
}
