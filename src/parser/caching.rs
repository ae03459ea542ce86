use super::{Parser, StandardParser};
use crate::error::{Error, Result};
use crate::table::RouteTable;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use sha2::{Digest, Sha256};

/// Memoizes [`Parser::parse_file`] on disk.
///
/// An entry is fresh while the routes file is not newer than it.
#[derive(Debug, Clone)]
pub struct CachingParser<P = StandardParser> {
    inner: P,
    cache_dir: PathBuf,
}

impl Default for CachingParser {
    fn default() -> Self {
        Self::new(StandardParser::new())
    }
}

impl<P: Parser> CachingParser<P> {
    /// Caches under the system temp directory.
    pub fn new(inner: P) -> Self {
        Self::with_cache_dir(inner, std::env::temp_dir())
    }

    pub fn with_cache_dir(inner: P, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Where the parsed form of `path` is stored.
    pub fn cache_path(&self, path: &Path) -> PathBuf {
        let digest = Sha256::digest(path.to_string_lossy().as_bytes());
        self.cache_dir.join(format!("{:x}.cache", digest))
    }

    fn load(&self, cache_path: &Path, source_modified: SystemTime) -> Option<RouteTable> {
        let cache_modified = modified(cache_path).ok()?;
        if source_modified > cache_modified {
            tracing::debug!(cache = %cache_path.display(), "route cache is stale");
            return None;
        }
        let bytes = fs::read(cache_path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::warn!(cache = %cache_path.display(), error = %e, "discarding corrupt route cache");
                None
            }
        }
    }

    fn store(&self, cache_path: &Path, table: &RouteTable) {
        let ret = serde_json::to_vec(table)
            .map_err(io::Error::from)
            .and_then(|bytes| fs::write(cache_path, bytes));
        if let Err(e) = ret {
            tracing::warn!(cache = %cache_path.display(), error = %e, "can not write route cache");
        }
    }
}

impl<P: Parser> Parser for CachingParser<P> {
    fn parse_source(&self, text: &str) -> RouteTable {
        self.inner.parse_source(text)
    }

    fn parse_file(&self, path: &Path) -> Result<RouteTable> {
        let source_modified = modified(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let cache_path = self.cache_path(path);

        if let Some(table) = self.load(&cache_path, source_modified) {
            tracing::debug!(path = %path.display(), cache = %cache_path.display(), "route cache hit");
            return Ok(table);
        }

        let table = self.inner.parse_file(path)?;
        self.store(&cache_path, &table);
        Ok(table)
    }
}

fn modified(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}
