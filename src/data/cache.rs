use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::DataError;
use super::loader::load_pair;
use super::model::DatasetPair;

/// Identity of a source file's contents as far as the filesystem tells us.
///
/// Only length and modification time are compared, so a same-length rewrite
/// landing within one mtime tick of the cached load is not detected. Use
/// [`LoaderCache::invalidate`] (the UI's Reload) to force a fresh read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl Fingerprint {
    fn of(path: &Path) -> Result<Self, DataError> {
        let meta = std::fs::metadata(path).map_err(|e| DataError::resource(path, e))?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

struct Entry {
    fingerprint: Fingerprint,
    datasets: Arc<DatasetPair>,
}

/// Memoizes loaded sources, keyed by the path they were opened with.
///
/// An entry is reused until the file's length or modification time changes.
#[derive(Default)]
pub struct LoaderCache {
    entries: HashMap<PathBuf, Entry>,
}

impl LoaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached tables for `path`, loading them on a miss or after
    /// the file changed. A failed load leaves no entry behind.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<DatasetPair>, DataError> {
        let fingerprint = match Fingerprint::of(path) {
            Ok(fp) => fp,
            Err(e) => {
                self.entries.remove(path);
                return Err(e);
            }
        };

        if let Some(entry) = self.entries.get(path) {
            if entry.fingerprint == fingerprint {
                log::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.datasets));
            }
            log::debug!("{} changed on disk, reloading", path.display());
        } else {
            log::debug!("Cache miss for {}", path.display());
        }

        match load_pair(path) {
            Ok(pair) => {
                let datasets = Arc::new(pair);
                self.entries.insert(
                    path.to_path_buf(),
                    Entry {
                        fingerprint,
                        datasets: Arc::clone(&datasets),
                    },
                );
                Ok(datasets)
            }
            Err(e) => {
                self.entries.remove(path);
                Err(e)
            }
        }
    }

    /// Drop the entry for `path`, forcing the next lookup to reload.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    #[cfg(test)]
    fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
