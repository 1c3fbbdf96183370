//! Read the first bytes of files, locators, and readers, and detect their
//! byte-order mark.

pub mod prefix;
pub mod source;

pub use prefix::{detect_from_bytes, detect_from_reader, read_prefix, Prefix};
pub use source::{
    detect_from_locator, detect_from_path, detect_from_source, detect_in, sniff, sniff_path,
    ByteSource, Locator, Sniffed,
};
