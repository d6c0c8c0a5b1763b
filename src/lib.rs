//! # wte-mkscript
//!
//! Compiles CSV game scripts into the binary script format read by the
//! engine at runtime.
//!
//! ## Format
//!
//! Each CSV row has six columns: a timer followed by five text fields.
//! Every row becomes one record:
//!
//! - the timer as a little-endian `i32` (4 bytes)
//! - each text field's bytes, followed by a single `0x00`
//!
//! Records are written back to back. The blob has no header, no record
//! count and no trailer.
//!
//! ## Example
//!
//! ```
//! use wte_mkscript::{encode, load};
//!
//! let table = load(b"3,go,north,,exit,door\n").unwrap();
//! let blob = encode(&table).unwrap();
//!
//! assert_eq!(&blob.as_bytes()[..4], &3i32.to_le_bytes());
//! assert_eq!(&blob.as_bytes()[4..], b"go\0north\0\0exit\0door\0");
//! ```

pub mod build;
pub mod encoder;
pub mod error;
pub mod record;
pub mod sink;
pub mod table;

pub use build::{
    BuildRequest, BuildSummary, DEFAULT_EXTENSION, InputFormat, build, resolve_output_path,
};
pub use encoder::{Blob, encode, encode_row};
pub use error::{Result, ScriptError};
pub use record::{FIELD_COUNT, Record, TERMINATOR, TEXT_FIELDS, TIMER_WIDTH};
pub use sink::{OverwritePolicy, write_blob};
pub use table::{LoadOptions, Row, Table, load, load_path, load_with};
