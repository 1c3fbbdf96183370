//! Byte sources: files, locators, and caller-supplied openers.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use url::Url;

use sniff_core::{Detection, Encoding, Result, SniffError};

use crate::prefix::{detect_logged, read_prefix_with, Prefix};

/// Something that can be opened as a readable byte stream.
pub trait ByteSource {
    /// Human-readable name used in logs and error context.
    fn describe(&self) -> String;

    /// Open a fresh reader positioned at the start of the source.
    fn open(&self) -> Result<Box<dyn Read + '_>>;
}

impl ByteSource for Path {
    fn describe(&self) -> String {
        self.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn Read + '_>> {
        let file = File::open(self).map_err(|e| SniffError::read(self.describe(), e))?;
        Ok(Box::new(file))
    }
}

impl ByteSource for PathBuf {
    fn describe(&self) -> String {
        self.as_path().describe()
    }

    fn open(&self) -> Result<Box<dyn Read + '_>> {
        self.as_path().open()
    }
}

/// Schemes that name a resource even without a `//` authority.
const OPAQUE_SCHEMES: &[&str] = &["about", "blob", "data", "javascript", "mailto", "urn"];

/// A resource locator resolved to a local file.
///
/// Accepts `file://` URLs and plain filesystem paths. Input is read as a URL
/// only when it has a `scheme://` authority or an opaque scheme such as
/// `data:`, and does not name an existing file. Anything else is a path, so
/// `notes:v2.txt` stays a file name. URLs with schemes other than `file` are
/// rejected without opening anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    raw: String,
    path: PathBuf,
}

impl Locator {
    pub fn parse(locator: &str) -> Result<Self> {
        if locator.trim().is_empty() {
            return Err(unsupported(locator, "empty locator"));
        }

        let as_path = Path::new(locator);
        if as_path.exists() {
            return Ok(Self::from_path(locator, as_path.to_path_buf()));
        }

        let has_authority = locator.contains("://");
        let path = match Url::parse(locator) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|()| unsupported(locator, "file URL does not name a local path"))?,
            // Windows drive letters parse as one-letter schemes.
            Ok(url) if url.scheme().len() == 1 => as_path.to_path_buf(),
            Ok(url) if has_authority || OPAQUE_SCHEMES.contains(&url.scheme()) => {
                return Err(unsupported(
                    locator,
                    &format!("scheme '{}' is not readable", url.scheme()),
                ))
            }
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => as_path.to_path_buf(),
            Err(e) if has_authority => return Err(unsupported(locator, &e.to_string())),
            Err(_) => as_path.to_path_buf(),
        };

        Ok(Self::from_path(locator, path))
    }

    fn from_path(raw: &str, path: PathBuf) -> Self {
        Self {
            raw: raw.to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for Locator {
    fn describe(&self) -> String {
        self.raw.clone()
    }

    fn open(&self) -> Result<Box<dyn Read + '_>> {
        let file = File::open(&self.path).map_err(|e| SniffError::read(&self.raw, e))?;
        Ok(Box::new(file))
    }
}

fn unsupported(locator: &str, reason: &str) -> SniffError {
    log::warn!("Cannot open {:?}: {}", locator, reason);
    SniffError::UnsupportedSource(format!("{}: {}", locator, reason))
}

/// Outcome of sniffing a source, with the bytes that were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniffed {
    pub detection: Option<Detection>,
    pub prefix: Prefix,
}

impl Sniffed {
    pub fn encoding(&self) -> Option<Encoding> {
        self.detection.map(|d| d.encoding())
    }

    /// Prefix bytes that belong to the content rather than the mark.
    pub fn content_prefix(&self) -> &[u8] {
        match self.detection {
            Some(detection) => detection.strip(self.prefix.as_bytes()),
            None => self.prefix.as_bytes(),
        }
    }
}

/// Open `source`, read its prefix, and close it before detecting.
pub fn sniff<S: ByteSource + ?Sized>(source: &S) -> Result<Sniffed> {
    let context = source.describe();
    log::debug!("Sniffing {}", context);

    let prefix = {
        let mut reader = source.open()?;
        read_prefix_with(&mut reader, &context)?
    };

    let detection = detect_logged(&prefix, &context);
    Ok(Sniffed { detection, prefix })
}

pub fn detect_in<S: ByteSource + ?Sized>(source: &S) -> Result<Option<Detection>> {
    sniff(source).map(|s| s.detection)
}

/// Run detection over a reader produced by `open`.
///
/// The reader is dropped before this returns, whether reading succeeded,
/// stopped short, or failed. Errors from `open` are passed through unchanged.
pub fn detect_from_source<F, R>(open: F) -> Result<Option<Detection>>
where
    F: FnOnce() -> Result<R>,
    R: Read,
{
    let mut reader = open()?;
    let prefix = read_prefix_with(&mut reader, "source");
    drop(reader);
    Ok(detect_logged(&prefix?, "source"))
}

pub fn detect_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Detection>> {
    detect_in(path.as_ref())
}

pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<Sniffed> {
    sniff(path.as_ref())
}

/// Detect the mark of the resource named by `locator`. See [`Locator`].
pub fn detect_from_locator(locator: &str) -> Result<Option<Detection>> {
    let locator = Locator::parse(locator)?;
    detect_in(&locator)
}
