//! One input file to one script blob: format detection, output path
//! defaulting, load, encode, write.

use crate::encoder::encode;
use crate::error::{Result, ScriptError};
use crate::sink::{OverwritePolicy, write_unchecked};
use crate::table::{LoadOptions, load_path};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension given to outputs named without one.
pub const DEFAULT_EXTENSION: &str = "sdf";

/// Input formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
}

impl InputFormat {
    /// Detect from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            _ => Err(ScriptError::UnsupportedFormat(ext)),
        }
    }
}

/// Append [`DEFAULT_EXTENSION`] when `path` has no extension.
pub fn resolve_output_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Everything needed for one build.
#[derive(Debug)]
pub struct BuildRequest<'a> {
    pub input: PathBuf,
    pub output: PathBuf,
    pub load: LoadOptions,
    pub overwrite: OverwritePolicy<'a>,
}

impl<'a> BuildRequest<'a> {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            load: LoadOptions::default(),
            overwrite: OverwritePolicy::Never,
        }
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.load.has_header = has_header;
        self
    }

    pub fn overwrite(mut self, policy: OverwritePolicy<'a>) -> Self {
        self.overwrite = policy;
        self
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub bytes: usize,
}

/// Compile `request.input` into a script blob at the resolved output path.
///
/// The overwrite decision is taken before the input is read. Any failure
/// after that point leaves the destination as it was.
pub fn build(request: BuildRequest<'_>) -> Result<BuildSummary> {
    let BuildRequest {
        input,
        output,
        load,
        mut overwrite,
    } = request;

    let format = InputFormat::from_path(&input)?;
    let output = resolve_output_path(&output);
    debug!(input = %input.display(), output = %output.display(), ?format, "starting build");

    overwrite.check(&output)?;

    let table = match format {
        InputFormat::Csv => load_path(&input, load)?,
    };
    let blob = encode(&table)?;
    write_unchecked(&blob, &output)?;

    debug!(rows = table.len(), bytes = blob.len(), "build complete");
    Ok(BuildSummary {
        output,
        rows: table.len(),
        bytes: blob.len(),
    })
}
