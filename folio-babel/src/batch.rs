//! Multi-file conversion driver
//!
//! Files are converted one at a time with nothing shared between them. A failure on one file
//! is logged and recorded, and the batch moves on to the next.
//!
//! Output is staged: the converter writes `<output>.part` and renames it into place only when
//! the whole file converted. A failed conversion leaves the staging file behind, holding the
//! partial output for diagnosis. The real output path never holds a partial result.

use crate::compile::compile;
use crate::error::FolioError;
use crate::formats::latex::{LatexEmitter, LatexOptions};
use crate::normalize::normalize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension a manuscript must carry to be picked up by a batch.
pub const INPUT_EXTENSION: &str = "txt";
pub const DEFAULT_NORMALIZED_SUFFIX: &str = ".new.txt";
pub const DEFAULT_LATEX_EXTENSION: &str = "tex";
const STAGING_SUFFIX: &str = ".part";

/// What to do with each file of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Normalize into `<stem><suffix>`
    Normalize { suffix: String },
    /// Compile into `<stem>.<extension>`
    Compile {
        options: LatexOptions,
        extension: String,
    },
}

impl Job {
    pub fn normalize() -> Self {
        Job::Normalize {
            suffix: DEFAULT_NORMALIZED_SUFFIX.to_string(),
        }
    }

    pub fn compile(options: LatexOptions) -> Self {
        Job::Compile {
            options,
            extension: DEFAULT_LATEX_EXTENSION.to_string(),
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Job::Normalize { .. } => "Format",
            Job::Compile { .. } => "Converting",
        }
    }

    /// Output path for `input`, or `None` when the input is not a `.txt` manuscript.
    pub fn output_path(&self, input: &Path) -> Option<PathBuf> {
        if input.extension()? != INPUT_EXTENSION {
            return None;
        }
        match self {
            Job::Normalize { suffix } => {
                let mut name = input.with_extension("").into_os_string();
                name.push(suffix);
                Some(PathBuf::from(name))
            }
            Job::Compile { extension, .. } => Some(input.with_extension(extension)),
        }
    }
}

/// Path the converter writes to before the output is complete.
pub fn staging_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Converts one file.
///
/// On success the output is in place at `output`. On failure anything written so far stays in
/// [`staging_path`]`(output)`. An `output` that names the input itself is refused before
/// anything is opened.
pub fn convert_file(input: &Path, output: &Path, job: &Job) -> Result<(), FolioError> {
    if same_file(input, output) {
        return Err(FolioError::OutputIsInput {
            path: input.to_path_buf(),
        });
    }
    let source = File::open(input).map_err(|source| FolioError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let staging = staging_path(output);
    let target = File::create(&staging).map_err(|source| FolioError::CreateOutput {
        path: staging.clone(),
        source,
    })?;

    let reader = BufReader::new(source);
    let mut writer = BufWriter::new(target);
    let result = match job {
        Job::Normalize { .. } => normalize(reader, &mut writer).map(|_| ()),
        Job::Compile { options, .. } => {
            compile(reader, LatexEmitter::new(&mut writer, options.clone())).map(|_| ())
        }
    };

    match result {
        Ok(()) => {
            writer.flush()?;
            drop(writer);
            fs::rename(&staging, output)?;
            Ok(())
        }
        Err(err) => {
            if let Err(flush) = writer.flush() {
                log::warn!("Could not flush {}: {flush}", staging.display());
            }
            Err(err)
        }
    }
}

fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Outputs written
    pub converted: Vec<PathBuf>,
    /// Inputs ignored because they are not manuscripts
    pub skipped: Vec<PathBuf>,
    /// Inputs whose conversion failed, with the reason
    pub failed: Vec<(PathBuf, FolioError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs `job` over every input in order.
pub fn run_batch<P: AsRef<Path>>(inputs: &[P], job: &Job) -> BatchReport {
    let mut report = BatchReport::default();

    for input in inputs {
        let input = input.as_ref();
        let Some(output) = job.output_path(input) else {
            log::warn!("Don't know how to convert {}. Ignore it.", input.display());
            report.skipped.push(input.to_path_buf());
            continue;
        };

        log::info!(
            "{} {} to {} ...",
            job.verb(),
            input.display(),
            output.display()
        );
        match convert_file(input, &output, job) {
            Ok(()) => {
                log::info!("Wrote {}", output.display());
                report.converted.push(output);
            }
            Err(err) => {
                if err.is_recoverable() {
                    log::error!("{err}");
                } else {
                    log::error!(
                        "{}: {err} (partial output kept in {})",
                        input.display(),
                        staging_path(&output).display()
                    );
                }
                report.failed.push((input.to_path_buf(), err));
            }
        }
    }

    report
}
