use std::io;

use thiserror::Error;

use crate::encoding::Encoding;

#[derive(Error, Debug)]
pub enum SniffError {
    /// The locator cannot be turned into a byte stream at all.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// The source failed while being opened or read.
    #[error("Read error on {context}: {source}")]
    Read {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("{encoding} mark is {expected} bytes, not {len}")]
    MarkLength {
        encoding: Encoding,
        expected: usize,
        len: usize,
    },
}

impl SniffError {
    pub fn read(context: impl Into<String>, source: io::Error) -> Self {
        SniffError::Read {
            context: context.into(),
            source,
        }
    }

    pub fn is_unsupported_source(&self) -> bool {
        matches!(self, SniffError::UnsupportedSource(_))
    }

    pub fn is_read_failure(&self) -> bool {
        matches!(self, SniffError::Read { .. })
    }

    /// The underlying I/O failure, for read errors.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            SniffError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SniffError>;
