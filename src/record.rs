//! Script record layout.
//!
//! One record is a signed 32-bit timer followed by five text fields, each
//! closed by a single zero byte:
//!
//! ```text
//! [i32 LE][text1][00][text2][00][text3][00][text4][00][text5][00]
//! ```
//!
//! There is no length prefix and no escaping. A text field that itself
//! contains a zero byte cannot be told apart from a field boundary when
//! the blob is read back.

use crate::error::{Result, ScriptError};
use crate::table::Row;

/// Fields per source row: the timer plus the text fields.
pub const FIELD_COUNT: usize = 6;

/// Text fields per record.
pub const TEXT_FIELDS: usize = FIELD_COUNT - 1;

/// Closes every text field.
pub const TERMINATOR: u8 = 0x00;

/// Width of the encoded timer.
pub const TIMER_WIDTH: usize = 4;

/// A validated row, borrowed from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub timer: i32,
    pub texts: [&'a str; TEXT_FIELDS],
}

impl<'a> Record<'a> {
    /// Validate `row` and borrow its fields.
    ///
    /// `row_number` is 1-based and only used for error context.
    pub fn from_row(row_number: usize, row: &'a Row) -> Result<Self> {
        let fields = row.fields();
        if fields.len() != FIELD_COUNT {
            return Err(ScriptError::Shape {
                row: row_number,
                actual: fields.len(),
            });
        }

        let raw_timer = fields[0].as_str();
        let timer = raw_timer
            .trim_matches(|c: char| c.is_ascii_whitespace())
            .parse::<i32>()
            .map_err(|_| ScriptError::FieldType {
                row: row_number,
                field: 0,
                value: raw_timer.to_string(),
            })?;

        let texts = [
            fields[1].as_str(),
            fields[2].as_str(),
            fields[3].as_str(),
            fields[4].as_str(),
            fields[5].as_str(),
        ];

        Ok(Self { timer, texts })
    }

    /// Bytes this record occupies once encoded.
    pub fn encoded_len(&self) -> usize {
        TIMER_WIDTH + self.texts.iter().map(|t| t.len()).sum::<usize>() + TEXT_FIELDS
    }

    /// Append the encoded record to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.timer.to_le_bytes());
        for text in self.texts {
            out.extend_from_slice(text.as_bytes());
            out.push(TERMINATOR);
        }
    }
}
