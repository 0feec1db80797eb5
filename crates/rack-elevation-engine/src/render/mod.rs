//! # Elevation Rendering
//!
//! Turns a resolved layout into markup-independent [`StructuralRow`]s and a
//! [`CsvExport`] of the parsed items. Serializing rows into the host's markup
//! lives in [`html`].

pub mod csv;
pub mod html;

use crate::{
    layout::{CollisionPolicy, LayoutWarning, RenderRow, resolve_layout},
    links::ResolvedLink,
    models::{EquipmentItem, RackConfig},
};

pub use csv::CsvExport;

/// The drawn block of an item, spanning `rows` table rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBlock {
    /// Model text, followed by [`ItemBlock::COMMENT_MARKER`] when there is a comment.
    pub label: String,
    pub name: String,
    pub color: String,
    /// Hover text: the comment, unescaped. Empty when there is none.
    pub tooltip: String,
    pub link: Option<ResolvedLink>,
    pub rows: u32,
}

impl ItemBlock {
    pub const COMMENT_MARKER: &'static str = " *";

    fn new(item: &EquipmentItem) -> Self {
        let mut label = item.model.clone();
        if item.has_comment() {
            label.push_str(Self::COMMENT_MARKER);
        }

        Self {
            label,
            name: item.name.clone(),
            color: item.color.clone(),
            tooltip: item.comment.clone().unwrap_or_default(),
            link: item.link.as_ref().map(|url| ResolvedLink {
                url: url.clone(),
                title: item.link_title.clone(),
            }),
            rows: item.u_size,
        }
    }
}

/// One row of the elevation table, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralRow {
    /// Header carrying the rack name.
    Title(String),
    Anchor { unit: u32, block: ItemBlock },
    /// Only the unit label; the item block above spans this row.
    Continuation { unit: u32 },
    Empty { unit: u32 },
    /// Bottom boundary holding the toggle for the CSV export.
    Footer,
}

impl From<&RenderRow<'_>> for StructuralRow {
    fn from(row: &RenderRow<'_>) -> Self {
        match row {
            RenderRow::Anchor { unit, item } => StructuralRow::Anchor {
                unit: *unit,
                block: ItemBlock::new(item),
            },
            RenderRow::Continuation { unit, .. } => StructuralRow::Continuation { unit: *unit },
            RenderRow::Empty { unit } => StructuralRow::Empty { unit: *unit },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRack {
    pub rows: Vec<StructuralRow>,
    pub csv: CsvExport,
    pub warnings: Vec<LayoutWarning>,
}

/// Renders items of one rack with a chosen collision policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer {
    policy: CollisionPolicy,
}

impl Renderer {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    /// Items are given in input order; the CSV export keeps that order.
    pub fn render<'a>(
        &self,
        config: &RackConfig,
        items: impl IntoIterator<Item = &'a EquipmentItem>,
    ) -> RenderedRack {
        let items: Vec<&EquipmentItem> = items.into_iter().collect();
        let layout = resolve_layout(config, items.iter().copied(), self.policy);
        for warning in &layout.warnings {
            log::warn!("rack {:?}: {warning}", config.name);
        }

        let mut rows = Vec::with_capacity(layout.rows.len() + 2);
        rows.push(StructuralRow::Title(config.name.clone()));
        rows.extend(layout.rows.iter().map(StructuralRow::from));
        rows.push(StructuralRow::Footer);

        RenderedRack {
            rows,
            csv: CsvExport::new(config, items.iter().copied()),
            warnings: layout.warnings,
        }
    }
}

/// Renders with the default last-write-wins collision policy.
pub fn render<'a>(
    config: &RackConfig,
    items: impl IntoIterator<Item = &'a EquipmentItem>,
) -> RenderedRack {
    Renderer::default().render(config, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::placed;

    #[test]
    fn rows_are_framed_by_title_and_footer() {
        let config = RackConfig::from_options("name=R1 height=2");
        let items = [placed(&config, 1, 1, "X")];
        let rendered = render(&config, &items);
        assert_eq!(
            rendered.rows,
            vec![
                StructuralRow::Title("R1".into()),
                StructuralRow::Empty { unit: 2 },
                StructuralRow::Anchor {
                    unit: 1,
                    block: ItemBlock {
                        label: "X".into(),
                        name: String::new(),
                        color: "#888".into(),
                        tooltip: String::new(),
                        link: None,
                        rows: 1,
                    },
                },
                StructuralRow::Footer,
            ]
        );
    }

    #[test]
    fn commented_item_gets_marker_and_tooltip() {
        let config = RackConfig::from_options("height=1");
        let mut item = placed(&config, 1, 1, "Server");
        item.comment = Some("spare <PSU>".into());
        item.link = Some("http://example.com".into());
        item.link_title = Some("Docs".into());

        let rendered = render(&config, [&item]);
        let StructuralRow::Anchor { block, .. } = &rendered.rows[1] else {
            panic!("expected anchor row, got {:?}", rendered.rows[1]);
        };
        assert_eq!(block.label, "Server *");
        assert_eq!(block.tooltip, "spare <PSU>");
        assert_eq!(
            block.link,
            Some(ResolvedLink {
                url: "http://example.com".into(),
                title: Some("Docs".into()),
            })
        );
    }

    #[test]
    fn continuation_rows_follow_anchor() {
        let config = RackConfig::from_options("height=3");
        let items = [placed(&config, 1, 3, "Chassis")];
        let rendered = render(&config, &items);
        assert!(matches!(rendered.rows[1], StructuralRow::Anchor { unit: 3, .. }));
        assert_eq!(rendered.rows[2], StructuralRow::Continuation { unit: 2 });
        assert_eq!(rendered.rows[3], StructuralRow::Continuation { unit: 1 });
    }

    #[test]
    fn oversized_height_option_renders_default_rack() {
        let config = RackConfig::from_options("height=4294967295");
        let items = [placed(&config, 1, 1, "X")];
        let rendered = render(&config, &items);
        assert_eq!(rendered.rows.len(), 42 + 2);
        assert!(matches!(rendered.rows[42], StructuralRow::Anchor { unit: 1, .. }));
    }

    #[test]
    fn warnings_are_passed_through() {
        let config = RackConfig::from_options("height=2");
        let items = [placed(&config, 2, 2, "Tall")];
        let rendered = render(&config, &items);
        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.csv.as_str().contains("\"Tall\""));
    }
}
