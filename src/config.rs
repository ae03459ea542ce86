use crate::error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings shared by the router, the rewriter and the filter.
///
/// Paths are checked when they are set, so a `Config` never holds a routes
/// file it can not read or a cache directory it can not write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    routes_file: Option<PathBuf>,
    extension: Option<String>,
    site_domain: Option<String>,
    site_web_root: String,
    cache_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes_file: None,
            extension: None,
            site_domain: None,
            site_web_root: "/".to_owned(),
            cache_directory: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    routes_file: Option<PathBuf>,
    extension: Option<String>,
    site_domain: Option<String>,
    site_web_root: Option<String>,
    cache_directory: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a TOML document. Relative paths in it are taken as they are.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        let mut config = Self::new();
        if let Some(path) = raw.routes_file {
            config.set_routes_file(path)?;
        }
        if let Some(dir) = raw.cache_directory {
            config.set_cache_directory(dir)?;
        }
        if let Some(ext) = raw.extension {
            config.set_extension(ext);
        }
        if let Some(domain) = raw.site_domain {
            config.set_site_domain(domain);
        }
        if let Some(web_root) = raw.site_web_root {
            config.set_site_web_root(web_root);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded routing config");
        Ok(config)
    }

    pub fn routes_file(&self) -> Option<&Path> {
        self.routes_file.as_deref()
    }

    pub fn set_routes_file(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
        let path = path.into();
        if !path.is_file() || fs::File::open(&path).is_err() {
            return Err(ConfigError::InvalidRoutesFile(path));
        }
        self.routes_file = Some(path);
        Ok(self)
    }

    pub fn cache_directory(&self) -> Option<&Path> {
        self.cache_directory.as_deref()
    }

    pub fn set_cache_directory(&mut self, dir: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
        let dir = dir.into();
        let writeable = fs::metadata(&dir)
            .map(|meta| meta.is_dir() && !meta.permissions().readonly())
            .unwrap_or(false);
        if !writeable {
            return Err(ConfigError::InvalidCacheDirectory(dir));
        }
        self.cache_directory = Some(dir);
        Ok(self)
    }

    /// Without the leading dot, e.g. `html`.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) -> &mut Self {
        let extension = extension.into();
        let extension = extension.strip_prefix('.').unwrap_or(&extension);
        self.extension = Some(extension.to_owned()).filter(|e| !e.is_empty());
        self
    }

    pub fn site_domain(&self) -> Option<&str> {
        self.site_domain.as_deref()
    }

    pub fn set_site_domain(&mut self, domain: impl Into<String>) -> &mut Self {
        self.site_domain = Some(domain.into()).filter(|d| !d.is_empty());
        self
    }

    pub fn site_web_root(&self) -> &str {
        &self.site_web_root
    }

    pub fn set_site_web_root(&mut self, web_root: impl Into<String>) -> &mut Self {
        self.site_web_root = web_root.into();
        self
    }
}
