mod caching;

pub use self::caching::CachingParser;

use crate::error::{Error, Result};
use crate::specification::{Parameter, ParameterList, Specification};
use crate::table::RouteTable;
use crate::types::TypeTable;

use std::fs;
use std::path::Path;

use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;

const COMMENT: char = '#';
const TYPE: char = ':';
const BLOCK: char = '[';
const ASSIGN: &str = " = ";

static TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+):?(\w*)\((.*)\)$").unwrap());
static METHOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+) (.*)$").unwrap());
static BLOCK_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\w+|\*)(:.+)?\]").unwrap());
static EXPLICIT_CONTROLLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+:\w*\(").unwrap());

/// Turns route-table source into a [`RouteTable`].
pub trait Parser {
    fn parse_source(&self, text: &str) -> RouteTable;

    fn parse_file(&self, path: &Path) -> Result<RouteTable> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let table = self.parse_source(&text);
        tracing::debug!(
            path = %path.display(),
            routes = table.len(),
            types = table.types().len(),
            "parsed route table"
        );
        Ok(table)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    fn parse_source(&self, text: &str) -> RouteTable {
        (**self).parse_source(text)
    }

    fn parse_file(&self, path: &Path) -> Result<RouteTable> {
        (**self).parse_file(path)
    }
}

/// The line-oriented route grammar:
///
/// ```text
/// # comment
/// :userid = \d\w+
/// [user:/account]
/// /:userid = show( id )
/// [*]
/// DELETE /message/:num = usermessage:delete( id )
/// /groups/:num/discussions/:num = group:show( id, discussionId:1 )
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardParser;

#[derive(Debug, Default)]
struct Block {
    controller: String,
    base_url: String,
}

impl StandardParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a single `[METHOD ]route = controller[:action]( params )` line.
    /// Returns `None` for anything else.
    pub fn parse_spec(&self, text: &str) -> Option<Specification> {
        let (route, target) = text.split_once(ASSIGN)?;
        let caps = TARGET.captures(target)?;

        let controller = &caps[1];
        let action = &caps[2];
        let parameters = parse_parameters(&caps[3]);

        let (method, route) = match METHOD.captures(route) {
            Some(m) => {
                let method = Method::from_bytes(m[1].as_bytes()).ok()?;
                (Some(method), m.get(2).map_or("", |r| r.as_str()))
            }
            None => (None, route),
        };

        Some(Specification::new(
            route, controller, action, parameters, method,
        ))
    }

    fn parse_type(line: &str) -> Option<(&str, &str)> {
        let (name, fragment) = line.split_once(ASSIGN)?;
        let name = name.strip_prefix(TYPE)?;
        if name.is_empty() || fragment.is_empty() {
            return None;
        }
        Some((name, fragment))
    }

    fn parse_block_spec(&self, block: &Block, text: &str) -> Option<Specification> {
        let (route, target) = text.split_once(ASSIGN)?;

        let route = match route.find('/') {
            Some(pos) => format!("{}{}{}", &route[..pos], block.base_url, &route[pos..]),
            None => route.to_owned(),
        };

        let target = if EXPLICIT_CONTROLLER.is_match(target) {
            target.to_owned()
        } else {
            format!("{}:{}", block.controller, target)
        };

        self.parse_spec(&format!("{}{}{}", route, ASSIGN, target))
    }
}

impl Parser for StandardParser {
    fn parse_source(&self, text: &str) -> RouteTable {
        let mut specifications = Vec::new();
        let mut types = TypeTable::builtin();
        let mut block: Option<Block> = None;

        for line in text.lines() {
            let line = line.trim();

            match line.chars().next() {
                None | Some(COMMENT) => {}

                Some(TYPE) => match Self::parse_type(line) {
                    Some((name, fragment)) => {
                        types.insert(name, fragment);
                    }
                    None => tracing::debug!(line, "skipping malformed type declaration"),
                },

                Some(BLOCK) => {
                    if let Some(caps) = BLOCK_MARKER.captures(line) {
                        block = match &caps[1] {
                            "*" => None,
                            name => Some(Block {
                                controller: name.to_owned(),
                                base_url: caps
                                    .get(2)
                                    .map_or("", |m| &m.as_str()[1..])
                                    .to_owned(),
                            }),
                        };
                    }
                }

                Some(_) => {
                    let spec = match &block {
                        Some(b) => self.parse_block_spec(b, line),
                        None => self.parse_spec(line),
                    };
                    match spec {
                        Some(spec) => specifications.push(spec),
                        None => tracing::debug!(line, "skipping unrecognised route line"),
                    }
                }
            }
        }

        RouteTable::from_parts(specifications, types)
    }
}

fn parse_parameters(list: &str) -> ParameterList {
    let mut parameters = ParameterList::new();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, default) = match entry.split_once(':') {
            Some((name, default)) => (name.trim(), Some(default.trim().to_owned())),
            None => (entry, None),
        };
        if name.is_empty() {
            continue;
        }
        let param = Parameter::new(name, default);
        match parameters.iter_mut().find(|p| p.name() == name) {
            Some(slot) => *slot = param,
            None => parameters.push(param),
        }
    }

    parameters
}
