//! Finding `<rack ...>...</rack>` blocks in a larger document.

use std::{ops::Range, sync::OnceLock};

use regex::Regex;

use crate::{
    parsing::{ParsedRack, RackParser},
    render::{RenderedRack, Renderer},
};

/// The raw parts of one rack block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackBlock<'a> {
    /// Everything between `<rack` and the closing `>` of the opening tag.
    pub options: &'a str,
    pub body: &'a str,
    /// Byte range of the whole block in the document.
    pub span: Range<usize>,
}

impl RackBlock<'_> {
    /// Parses and renders this block with fresh state.
    pub fn render(&self, parser: &RackParser, renderer: &Renderer) -> RackOutput {
        let parsed = parser.parse(self.body, self.options);
        let rendered = renderer.render(&parsed.config, parsed.items());
        RackOutput { parsed, rendered }
    }
}

/// Both artifacts of one rack block: the parse outcomes (with syntax errors in
/// input order) and the rendered rows and CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackOutput {
    pub parsed: ParsedRack,
    pub rendered: RenderedRack,
}

/// Every rack block in `text`, in document order.
pub fn rack_blocks(text: &str) -> Vec<RackBlock<'_>> {
    static BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    let block_regex = BLOCK_REGEX
        .get_or_init(|| Regex::new(r"(?s)<rack([^>]*)>(.*?)</rack>").expect("Invalid rack block regex"));

    block_regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(RackBlock {
                options: caps.get(1)?.as_str(),
                body: caps.get(2)?.as_str(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Renders every rack block of a document independently.
pub fn render_document(text: &str, parser: &RackParser, renderer: &Renderer) -> Vec<RackOutput> {
    rack_blocks(text)
        .iter()
        .map(|block| block.render(parser, renderer))
        .collect()
}
