use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Raised by [`Config`](crate::Config) as soon as a value is set or loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("routes file must be a readable file: {0:?}")]
    InvalidRoutesFile(PathBuf),

    #[error("cache directory must be a writeable directory: {0:?}")]
    InvalidCacheDirectory(PathBuf),

    #[error("can not read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("can not read routes file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
