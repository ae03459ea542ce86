//! Two-way URL routing over one route table.
//!
//! A [`Router`] maps request paths such as `/user/123` onto a controller, an
//! action and parameters. A [`Rewriter`] goes the other way and turns
//! canonical `server.php?controller=user&id=123` URLs into route URLs, and a
//! [`Filter`] applies the rewriter to links and forms in HTML.
//!
//! ```
//! use duplex_router::{route_table, Method, Rewriter, Router};
//!
//! let table = route_table! {
//!     "/user/:num" => "user:show( id )",
//! };
//!
//! let router = Router::new(table.clone());
//! let m = router.find(&Method::GET, "/user/123").unwrap();
//! assert_eq!(m.controller(), "user");
//! assert_eq!(m.params().get("id"), Some("123"));
//!
//! let rewriter = Rewriter::new(table);
//! let url = rewriter.rewrite("server.php?controller=user&action=show&id=123", false);
//! assert_eq!(url, "/user/123");
//! ```

#![forbid(unsafe_code)]

mod config;
mod encoding;
mod error;
mod filter;
mod parser;
mod request;
mod rewriter;
mod router;
mod routing;
mod specification;
mod strmap;
mod table;
mod types;

#[cfg(feature = "http-request")]
mod http_request;

pub use crate::config::Config;
pub use crate::encoding::{url_decode, url_encode};
pub use crate::error::{ConfigError, Error, Result};
pub use crate::filter::Filter;
pub use crate::parser::{CachingParser, Parser, StandardParser};
pub use crate::request::{MemoryRequest, Request};
pub use crate::rewriter::{RewriteInfo, Rewriter};
pub use crate::router::{Match, Params, Router};
pub use crate::routing::Routing;
pub use crate::specification::{Parameter, Specification, DEFAULT_ACTION};
pub use crate::table::RouteTable;
pub use crate::types::TypeTable;

#[cfg(feature = "http-request")]
pub use crate::http_request::RouteParams;

pub use http::Method;
