//! Lazy JPEG discovery in directory trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use log::debug;

use crate::corpus::CorpusEntry;
use crate::error::{Error, Result};

/// Recognized extensions, matched case-sensitively.
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Pull-based depth-first walk over a corpus directory.
///
/// Each call to [`next`](Iterator::next) lists at most the directories it has
/// to descend into and reads exactly one matching file. Children of every
/// directory are visited in lexicographic order. Symlinked directories are
/// never descended into, so link cycles cannot repeat entries. Symlinks to
/// files are read like regular files. After the first error the walk is
/// finished and yields `None`.
#[derive(Debug)]
pub struct CorpusWalk {
    root: PathBuf,
    pending: Vec<vec::IntoIter<Child>>,
    started: bool,
    finished: bool,
}

/// A directory child, classified without following symlinks.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Child {
    path: PathBuf,
    is_dir: bool,
}

impl CorpusWalk {
    pub(crate) fn new(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::NotFound {
                path: root.to_path_buf(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            pending: Vec::new(),
            started: false,
            finished: false,
        })
    }

    /// Root directory of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drain the walk, stopping at the first error.
    pub fn collect_entries(self) -> Result<Vec<CorpusEntry>> {
        self.collect()
    }

    fn descend(&mut self, dir: &Path) -> Result<()> {
        let io_err = |source| Error::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut children = fs::read_dir(dir)
            .map_err(io_err)?
            .map(|entry| -> std::io::Result<Child> {
                let entry = entry?;
                Ok(Child {
                    is_dir: entry.file_type()?.is_dir(),
                    path: entry.path(),
                })
            })
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(io_err)?;
        children.sort();

        self.pending.push(children.into_iter());
        Ok(())
    }

    fn read_entry(&self, path: &Path) -> Result<CorpusEntry> {
        let content = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let relative_path = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();

        let entry = CorpusEntry::new(relative_path, content);
        debug!("discovered {} ({} bytes)", entry.id(), entry.len());
        Ok(entry)
    }

    fn fail(&mut self, err: Error) -> Option<Result<CorpusEntry>> {
        self.finished = true;
        self.pending.clear();
        Some(Err(err))
    }
}

impl Iterator for CorpusWalk {
    type Item = Result<CorpusEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            let root = self.root.clone();
            if let Err(err) = self.descend(&root) {
                return self.fail(err);
            }
        }

        loop {
            let Some(children) = self.pending.last_mut() else {
                self.finished = true;
                return None;
            };

            let Some(Child { path, is_dir }) = children.next() else {
                self.pending.pop();
                continue;
            };

            if is_dir {
                if let Err(err) = self.descend(&path) {
                    return self.fail(err);
                }
            } else if has_jpeg_extension(&path) {
                return match self.read_entry(&path) {
                    Ok(entry) => Some(Ok(entry)),
                    Err(err) => self.fail(err),
                };
            }
        }
    }
}

impl std::iter::FusedIterator for CorpusWalk {}

fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| JPEG_EXTENSIONS.contains(&ext))
}
