use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::parser::{CachingParser, Parser, StandardParser};
use crate::rewriter::Rewriter;
use crate::router::Router;
use crate::table::RouteTable;

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

/// One place to get a router, a rewriter and a filter that share a
/// configuration and a route table.
///
/// The routes file is parsed on first use, through the on-disk cache.
#[derive(Debug)]
pub struct Routing {
    config: Config,
    table: OnceCell<Arc<RouteTable>>,
}

impl Routing {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: OnceCell::new(),
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Config::load(path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Empty when no routes file is configured.
    pub fn table(&self) -> Result<Arc<RouteTable>> {
        self.table
            .get_or_try_init(|| {
                let table = match self.config.routes_file() {
                    Some(path) => {
                        let cache_dir = self
                            .config
                            .cache_directory()
                            .map_or_else(std::env::temp_dir, Path::to_owned);
                        CachingParser::with_cache_dir(StandardParser::new(), cache_dir)
                            .parse_file(path)?
                    }
                    None => RouteTable::new(),
                };
                Ok::<_, Error>(Arc::new(table))
            })
            .map(Arc::clone)
    }

    pub fn router(&self) -> Result<Router> {
        Ok(Router::from_config(self.table()?, &self.config))
    }

    pub fn rewriter(&self) -> Result<Rewriter> {
        Ok(Rewriter::from_config(self.table()?, &self.config))
    }

    pub fn filter(&self) -> Result<Filter> {
        Ok(Filter::new(self.rewriter()?))
    }
}
