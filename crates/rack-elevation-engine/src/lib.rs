pub mod color;
pub mod document;
pub mod io;
pub mod layout;
pub mod links;
pub mod models;
pub mod parsing;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use color::{ColorClassifier, ModelColorRules};
pub use document::{RackBlock, RackOutput, rack_blocks, render_document};
pub use layout::{CollisionPolicy, Layout, LayoutWarning, RenderRow, resolve_layout};
pub use links::{HostLinks, LinkError, LinkRef, LinkResolver, PageLinks, ResolvedLink, WikiLinkResolver};
pub use models::{Direction, EquipmentItem, RackConfig};
pub use parsing::{LineError, ParseOutcome, ParsedRack, RackParser, SyntaxError, parse};
pub use render::{CsvExport, ItemBlock, RenderedRack, Renderer, StructuralRow, html::HtmlWriter, render};
