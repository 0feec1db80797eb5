//! # Rack Parsing
//!
//! Turns the body of a `<rack>` block into equipment items, one line at a time.
//!
//! ## Modules
//!
//! - **`kinds`**: Field types with owned delimiters (Quoted, ColorTag, LinkField, CommentLine)
//! - **`cursor`**: `Cursor` for byte-by-byte scanning of one line
//! - **`line`**: `scan_line()` splits a line into raw fields or a `LineError`
//!
//! Color picking and link resolution are injected into [`RackParser`] so they
//! can be swapped independently of the grammar.

pub mod cursor;
pub mod kinds;
pub mod line;

#[cfg(test)]
mod tests;

use crate::{
    color::{ColorClassifier, ModelColorRules},
    links::{LinkResolver, WikiLinkResolver},
    models::{EquipmentItem, RackConfig},
};

use kinds::{CommentLine, Quoted};
pub use line::{LineError, LineFields, scan_line};

/// A line that does not match the equipment grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// The offending line, verbatim.
    pub line: String,
    pub reason: LineError,
}

/// Result of parsing one non-blank, non-comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Item(EquipmentItem),
    SyntaxError(SyntaxError),
}

/// Everything parsed from one rack block, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRack {
    pub config: RackConfig,
    pub outcomes: Vec<ParseOutcome>,
    /// The block body held nothing but whitespace.
    pub no_data: bool,
}

impl ParsedRack {
    pub fn items(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.outcomes.iter().filter_map(|o| match o {
            ParseOutcome::Item(item) => Some(item),
            ParseOutcome::SyntaxError(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &SyntaxError> {
        self.outcomes.iter().filter_map(|o| match o {
            ParseOutcome::SyntaxError(err) => Some(err),
            ParseOutcome::Item(_) => None,
        })
    }
}

/// Line parser with pluggable color and link strategies.
pub struct RackParser {
    colors: Box<dyn ColorClassifier>,
    links: Box<dyn LinkResolver>,
}

impl Default for RackParser {
    fn default() -> Self {
        Self {
            colors: Box::new(ModelColorRules),
            links: Box::new(WikiLinkResolver::<crate::links::PageLinks>::default()),
        }
    }
}

impl RackParser {
    pub fn new(colors: Box<dyn ColorClassifier>, links: Box<dyn LinkResolver>) -> Self {
        Self { colors, links }
    }

    pub fn with_colors(mut self, colors: impl ColorClassifier + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    pub fn with_links(mut self, links: impl LinkResolver + 'static) -> Self {
        self.links = Box::new(links);
        self
    }

    /// Parses a block body with its option string.
    pub fn parse(&self, body: &str, options: &str) -> ParsedRack {
        let config = RackConfig::from_options(options);
        let body = body.trim_end_matches(['\r', '\n']).trim_start();

        let outcomes = body
            .lines()
            .filter_map(|line| self.parse_line(line, &config))
            .collect();

        ParsedRack {
            config,
            outcomes,
            no_data: body.trim().is_empty(),
        }
    }

    /// Parses one line. Comment and blank lines produce `None`.
    pub fn parse_line(&self, line: &str, config: &RackConfig) -> Option<ParseOutcome> {
        if CommentLine::is_skipped(line) {
            log::debug!("skipping line {line:?}");
            return None;
        }

        let fields = match scan_line(line) {
            Ok(fields) => fields,
            Err(reason) => {
                return Some(ParseOutcome::SyntaxError(SyntaxError {
                    line: line.to_string(),
                    reason,
                }));
            }
        };

        Some(ParseOutcome::Item(self.build_item(&fields, config)))
    }

    fn build_item(&self, fields: &LineFields<'_>, config: &RackConfig) -> EquipmentItem {
        let model = Quoted::strip(fields.model).to_string();
        let color = match fields.color {
            Some(color) => color.to_string(),
            None => self.colors.color_for(&model),
        };

        let resolved = match fields.link {
            Some(raw) => self.links.resolve(raw).unwrap_or_else(|e| {
                log::warn!("dropping link of {model:?}: {e}");
                None
            }),
            None => None,
        };
        let (link, link_title) = match resolved {
            Some(link) => (Some(link.url), link.title),
            None => (None, None),
        };

        EquipmentItem {
            u_bottom: fields.u_bottom,
            u_size: fields.u_size,
            u_top: EquipmentItem::top_unit(fields.u_bottom, fields.u_size, config.direction()),
            name: Quoted::strip(fields.name).to_string(),
            color,
            link,
            link_title,
            comment: (!fields.comment.is_empty()).then(|| fields.comment.to_string()),
            model,
        }
    }
}

/// Parses a block body with the default color rules and page links.
pub fn parse(body: &str, options: &str) -> ParsedRack {
    RackParser::default().parse(body, options)
}
