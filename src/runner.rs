//! Per-file processing: load, aggregate, export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::calc::{GenerationOutput, run_aggregation};
use crate::config::AppConfig;
use crate::error::AggregationError;
use crate::factors::ReferenceFactors;
use crate::io::ParseError;
use crate::io::export::{ExportError, export_output};
use crate::io::generation::load_generation_report;
use crate::io::reference::load_reference_factors;

/// Prefix of every output file name.
pub const OUTPUT_PREFIX: &str = "GenerationOutput_";

/// A single report could not be processed.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("cannot use folder \"{}\": {source}", path.display())]
    Folder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Processes generation reports one at a time.
///
/// Reference factors are loaded once at construction. When they cannot be
/// loaded every report fails with a missing reference data error instead.
#[derive(Debug)]
pub struct Processor {
    config: AppConfig,
    factors: Option<ReferenceFactors>,
    run_lock: Mutex<()>,
}

impl Processor {
    /// Creates a processor and loads the configured reference data.
    pub fn new(config: AppConfig) -> Self {
        let path = &config.paths.reference_data;
        let factors = match load_reference_factors(path) {
            Ok(f) => {
                info!(path = %path.display(), "loaded reference data");
                Some(f)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "cannot load reference data");
                None
            }
        };
        Self::with_factors(config, factors)
    }

    pub fn with_factors(config: AppConfig, factors: Option<ReferenceFactors>) -> Self {
        Self {
            config,
            factors,
            run_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn factors(&self) -> Option<&ReferenceFactors> {
        self.factors.as_ref()
    }

    /// Processes one report and returns the path of the written output.
    ///
    /// Only one report is processed at a time; concurrent callers wait.
    /// Generators that fail to load are logged as warnings and left out.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the report cannot be read, aggregation
    /// fails, or the output cannot be written.
    pub fn process_file(&self, path: &Path) -> Result<PathBuf, ProcessError> {
        let _guard = self.run_lock.lock();

        let settle = self.config.watch.settle_delay_ms;
        if settle > 0 {
            thread::sleep(Duration::from_millis(settle));
        }

        let loaded = load_generation_report(path)?;
        for diag in &loaded.diagnostics {
            warn!(
                file = %path.display(),
                kind = %diag.kind,
                index = diag.index,
                error = %diag.error,
                "skipped generator"
            );
        }

        let output = run_aggregation(Some(&loaded.report), self.factors.as_ref())?;
        let out_path = self.write_output(&output, Local::now())?;
        info!(
            file = %path.display(),
            output = %out_path.display(),
            summary = %output,
            "processed generation report"
        );
        Ok(out_path)
    }

    /// Processes one report, logging any failure with its path.
    pub fn handle_file(&self, path: &Path) -> Option<PathBuf> {
        match self.process_file(path) {
            Ok(out) => Some(out),
            Err(e) => {
                error!(file = %path.display(), error = %e, "error processing file");
                None
            }
        }
    }

    /// Processes every report already in the input folder, in path order.
    ///
    /// Returns the outputs that were written. A failing report is logged
    /// and does not stop the others.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Folder` if the input folder cannot be listed.
    pub fn process_existing(&self) -> Result<Vec<PathBuf>, ProcessError> {
        let folder = &self.config.paths.input_folder;
        let files = list_report_files(folder).map_err(|source| ProcessError::Folder {
            path: folder.clone(),
            source,
        })?;
        info!(folder = %folder.display(), count = files.len(), "processing existing reports");
        Ok(files.iter().filter_map(|f| self.handle_file(f)).collect())
    }

    fn write_output(
        &self,
        output: &GenerationOutput,
        now: DateTime<Local>,
    ) -> Result<PathBuf, ProcessError> {
        let folder = &self.config.paths.output_folder;
        fs::create_dir_all(folder).map_err(|source| ProcessError::Folder {
            path: folder.clone(),
            source,
        })?;
        let path = output_file_path(folder, &now.format("%Y%m%d_%H%M%S").to_string());
        export_output(output, &path)?;
        Ok(path)
    }
}

/// Returns `true` for files with an `.xml` extension, in any case.
pub fn is_report_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}

/// Lists report files directly inside `folder`, sorted by path.
///
/// # Errors
///
/// Returns an `io::Error` if the folder cannot be read.
pub fn list_report_files(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && is_report_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Picks `GenerationOutput_<stamp>.xml` in `folder`, adding `_1`, `_2`, …
/// until the name is unused.
pub fn output_file_path(folder: &Path, stamp: &str) -> PathBuf {
    let base = folder.join(format!("{OUTPUT_PREFIX}{stamp}.xml"));
    if !base.exists() {
        return base;
    }
    (1u32..)
        .map(|n| folder.join(format!("{OUTPUT_PREFIX}{stamp}_{n}.xml")))
        .find(|p| !p.exists())
        .unwrap_or(base)
}
