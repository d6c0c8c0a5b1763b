//! Record encoder: a [`Table`] in, one contiguous script blob out.
//!
//! Rows are validated and encoded strictly in table order. The first bad
//! row aborts the whole encode and no partial blob is returned.

use crate::error::Result;
use crate::record::Record;
use crate::table::{Row, Table};
use tracing::debug;

/// The encoded script: every record back to back, no header or count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob {
    bytes: Vec<u8>,
}

impl Blob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encode a single row. `row_number` is 1-based.
pub fn encode_row(row_number: usize, row: &Row) -> Result<Vec<u8>> {
    let record = Record::from_row(row_number, row)?;
    let mut out = Vec::with_capacity(record.encoded_len());
    record.write_to(&mut out);
    Ok(out)
}

/// Encode every row of `table`, in order, into one blob.
pub fn encode(table: &Table) -> Result<Blob> {
    // Validate everything before allocating the output.
    let records = table
        .iter()
        .enumerate()
        .map(|(i, row)| Record::from_row(i + 1, row))
        .collect::<Result<Vec<_>>>()?;

    let size = records.iter().map(Record::encoded_len).sum();
    let mut bytes = Vec::with_capacity(size);
    for record in &records {
        record.write_to(&mut bytes);
    }

    debug!(rows = records.len(), bytes = bytes.len(), "encoded script");
    Ok(Blob { bytes })
}
