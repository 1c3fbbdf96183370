//! Byte-order mark detection: classify a stream by its first four bytes.

pub mod detect;
pub mod encoding;
pub mod error;

pub use detect::{detect, mark_length, strip_bom, Detection, MAX_MARK_LEN};
pub use encoding::{mark_length_for_label, Encoding};
pub use error::{Result, SniffError};
