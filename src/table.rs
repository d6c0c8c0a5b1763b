//! Table loader: CSV text in, ordered rows of raw string fields out.
//!
//! The loader performs syntactic parsing only. A row keeps whatever number
//! of fields it had in the source, and numeric-looking values stay text;
//! checking shape and types is the encoder's job.

use crate::error::{Result, ScriptError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One row of raw field values, in source column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Rows in source order. Order becomes output record order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Loader settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Drop the first row as a header.
    pub has_header: bool,
}

/// Parse CSV bytes into a [`Table`] with default options.
pub fn load(source: &[u8]) -> Result<Table> {
    load_with(source, LoadOptions::default())
}

/// Parse CSV bytes into a [`Table`].
pub fn load_with(source: &[u8], options: LoadOptions) -> Result<Table> {
    check_quotes(source)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .flexible(true)
        .from_reader(source);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().collect::<Row>());
    }

    debug!(rows = rows.len(), has_header = options.has_header, "loaded table");
    Ok(Table::new(rows))
}

/// Read a whole file and parse it as CSV.
pub fn load_path(path: &Path, options: LoadOptions) -> Result<Table> {
    let source = fs::read(path).map_err(|e| ScriptError::io(path, e))?;
    load_with(&source, options)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    StartField,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Reject a quoted field that runs to end of input.
///
/// The CSV reader silently accepts an unterminated quote and swallows the
/// rest of the file into one field, so this is checked up front.
fn check_quotes(source: &[u8]) -> Result<()> {
    let mut state = QuoteState::StartField;
    let mut line: u64 = 1;
    let mut opened_at: u64 = 1;

    for &byte in source {
        state = match (state, byte) {
            (QuoteState::StartField, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (QuoteState::StartField | QuoteState::Unquoted, b',' | b'\n' | b'\r') => {
                QuoteState::StartField
            }
            (QuoteState::StartField | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b',' | b'\n' | b'\r') => QuoteState::StartField,
            (QuoteState::QuoteInQuoted, _) => QuoteState::Unquoted,
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    if state == QuoteState::Quoted {
        return Err(ScriptError::Parse {
            line: Some(opened_at),
            message: "unterminated quoted field".to_string(),
        });
    }
    Ok(())
}
