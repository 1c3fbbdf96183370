//! Reading the first few bytes of a stream.

use std::io::{self, Read};
use std::ops::Deref;

use sniff_core::{detect, Detection, Result, SniffError, MAX_MARK_LEN};

/// Up to [`MAX_MARK_LEN`] bytes read from the front of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Prefix {
    bytes: [u8; MAX_MARK_LEN],
    len: usize,
}

impl Prefix {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Deref for Prefix {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Read until the prefix is full or the stream ends. Interrupted reads are
/// retried; any other error is reported against `context`.
pub(crate) fn read_prefix_with<R: Read>(reader: &mut R, context: &str) -> Result<Prefix> {
    let mut prefix = Prefix::default();

    while prefix.len < MAX_MARK_LEN {
        match reader.read(&mut prefix.bytes[prefix.len..]) {
            Ok(0) => break,
            Ok(n) => prefix.len += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SniffError::read(context, e)),
        }
    }

    log::trace!("Read {} prefix byte(s) from {}", prefix.len, context);
    Ok(prefix)
}

/// Run the detector and log what it found under `context`.
pub(crate) fn detect_logged(prefix: &Prefix, context: &str) -> Option<Detection> {
    let detection = detect(prefix);
    match detection {
        Some(d) => log::debug!("{}: {} mark ({} bytes)", context, d.encoding(), d.len()),
        None => log::debug!("{}: no byte-order mark", context),
    }
    detection
}

/// Read at most [`MAX_MARK_LEN`] bytes from `reader`.
pub fn read_prefix<R: Read>(mut reader: R) -> Result<Prefix> {
    read_prefix_with(&mut reader, "stream")
}

/// Requires at least two bytes; shorter buffers have no mark.
pub fn detect_from_bytes(buffer: &[u8]) -> Option<Detection> {
    if buffer.len() > 1 {
        detect(buffer)
    } else {
        None
    }
}

pub fn detect_from_reader<R: Read>(mut reader: R) -> Result<Option<Detection>> {
    let prefix = read_prefix_with(&mut reader, "stream")?;
    Ok(detect_logged(&prefix, "stream"))
}
