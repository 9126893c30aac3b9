//! Corpus of sample JPEG files driving both differential testing and benchmarks.
//!
//! Discovery is lazy: [`discover`] checks the root and returns a [`CorpusWalk`]
//! iterator that lists directories and reads files only as entries are pulled.
//!
//! ## Example
//!
//! ```rust,ignore
//! use jpeg_parity::corpus;
//!
//! for entry in corpus::discover("./testdata")? {
//!     let entry = entry?;
//!     println!("{} ({} bytes)", entry.id(), entry.len());
//! }
//! ```

mod checksum;
mod discovery;

use std::path::{Component, Path, PathBuf};

pub use checksum::fingerprint;
pub use discovery::{CorpusWalk, JPEG_EXTENSIONS};

use crate::error::Result;

/// Start a lazy walk over every JPEG file below `root`.
///
/// Fails with [`Error::NotFound`](crate::Error::NotFound) when `root` is
/// missing or is not a directory. No directory is listed and no file is read
/// until the returned iterator is advanced.
pub fn discover(root: impl AsRef<Path>) -> Result<CorpusWalk> {
    CorpusWalk::new(root.as_ref())
}

/// One discovered corpus file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    relative_path: PathBuf,
    content: Vec<u8>,
}

impl CorpusEntry {
    /// Create an entry from a path relative to the corpus root and its bytes.
    #[must_use]
    pub fn new(relative_path: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content,
        }
    }

    /// File base name, e.g. `d.jpeg` for `c/d.jpeg`.
    ///
    /// Base names can repeat across subdirectories; use [`id`](Self::id) to
    /// key results.
    #[must_use]
    pub fn name(&self) -> &str {
        self.relative_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Relative path with `/` separators, unique within one corpus.
    #[must_use]
    pub fn id(&self) -> String {
        self.relative_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Path relative to the corpus root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// The file bytes as read during discovery.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the file was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// FNV-1a fingerprint of the content.
    #[must_use]
    pub fn checksum(&self) -> String {
        fingerprint(&self.content)
    }
}
