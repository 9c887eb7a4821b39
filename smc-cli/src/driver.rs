//! Compile one `.sm` file
//!
//!     read → parse (stopping early when the outputs are current) → generate → write
//!
//!     Every artifact is rendered in memory before the first file is written, so a failing
//!     backend never leaves half of its output behind. When a write fails, the files already
//!     written by the run are removed again.

use smc_codegen::{file_stem, Backend, BackendRegistry, GenerateError, GenerateOptions};
use smc_parser::smc::loader::{LoaderError, SourceLoader};
use smc_parser::smc::parsing::FreshnessCheck;
use smc_parser::{Fsm, ParseOutcome};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What one run asks for.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    /// Defaults to the input's directory
    pub output_dir: Option<PathBuf>,
    pub backend: String,
    pub force: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(Vec<PathBuf>),
    UpToDate,
}

impl Job {
    pub fn output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        match self.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Up to date when the backend's primary artifact is newer than the source file.
struct FsFreshness<'a> {
    source: &'a Path,
    output_dir: &'a Path,
    backend: &'a dyn Backend,
    options: &'a GenerateOptions,
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

impl FreshnessCheck for FsFreshness<'_> {
    fn is_up_to_date(&self, fsm: &Fsm) -> bool {
        let Ok(stem) = file_stem(fsm) else {
            return false;
        };
        let target = self
            .output_dir
            .join(self.backend.primary_file_name(&stem, self.options));
        match (modified(self.source), modified(&target)) {
            (Some(source), Some(target)) => target > source,
            _ => false,
        }
    }
}

pub fn run(job: &Job, registry: &BackendRegistry) -> Result<Outcome, DriverError> {
    let backend = registry.get(&job.backend)?;
    let output_dir = job.output_dir();
    let loader = SourceLoader::from_path(&job.input)?;

    let fsm = if job.force {
        loader.parse()?
    } else {
        let freshness = FsFreshness {
            source: &job.input,
            output_dir: &output_dir,
            backend,
            options: &job.options,
        };
        match loader.parse_with(&freshness)? {
            ParseOutcome::Model(fsm) => fsm,
            ParseOutcome::UpToDate => {
                tracing::info!(input = %job.input.display(), "outputs are up to date");
                return Ok(Outcome::UpToDate);
            }
        }
    };

    let artifacts = backend.generate(&fsm, &job.options)?;
    tracing::debug!(
        backend = backend.name(),
        artifacts = artifacts.len(),
        "rendered"
    );

    fs::create_dir_all(&output_dir).map_err(|source| DriverError::Write {
        path: output_dir.clone(),
        source,
    })?;
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = output_dir.join(&artifact.file_name);
        if let Err(source) = fs::write(&path, &artifact.contents) {
            remove_written(&written);
            return Err(DriverError::Write { path, source });
        }
        tracing::info!(path = %path.display(), "wrote");
        written.push(path);
    }
    Ok(Outcome::Generated(written))
}

/// Undo a run that failed halfway through writing.
fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => tracing::info!(path = %path.display(), "removed"),
            Err(err) => tracing::warn!(path = %path.display(), %err, "cannot remove"),
        }
    }
}
