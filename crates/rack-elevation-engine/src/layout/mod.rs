//! # Rack Layout
//!
//! Places parsed items on the `1..=height` unit scale and walks the scale from
//! the visual top of the rack to its bottom, producing one [`RenderRow`] per unit.
//!
//! Items are anchored on their `u_top`. Anomalies never fail the layout; they
//! are reported as [`LayoutWarning`]s next to the rows.

pub mod policy;

use std::collections::BTreeMap;

use crate::models::{EquipmentItem, RackConfig};

pub use policy::CollisionPolicy;

/// One unit of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRow<'a> {
    /// The unit where `item` is drawn, spanning `item.u_size` rows.
    Anchor { unit: u32, item: &'a EquipmentItem },
    /// A unit covered by the span of the item anchored above it in the walk.
    Continuation { unit: u32, item: &'a EquipmentItem },
    Empty { unit: u32 },
}

impl RenderRow<'_> {
    pub fn unit(&self) -> u32 {
        match self {
            RenderRow::Anchor { unit, .. }
            | RenderRow::Continuation { unit, .. }
            | RenderRow::Empty { unit } => *unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutWarning {
    #[error("unit {unit}: {kept:?} is drawn and {dropped:?} is not, both anchor there")]
    Collision {
        unit: i64,
        kept: String,
        dropped: String,
    },
    #[error("{model:?} spans units {u_bottom} to {u_top}, outside the rack's 1 to {height}")]
    OutOfRange {
        model: String,
        u_bottom: u32,
        u_top: i64,
        height: u32,
    },
    #[error("unit {unit}: {model:?} is hidden by {covered_by:?}")]
    Hidden {
        unit: u32,
        model: String,
        covered_by: String,
    },
}

/// Items keyed by their anchor unit.
#[derive(Debug, Default)]
pub struct SlotMap<'a> {
    slots: BTreeMap<i64, &'a EquipmentItem>,
}

impl<'a> SlotMap<'a> {
    /// Places items in input order. Out-of-range items are left out; anchor
    /// collisions are settled by `policy`.
    pub fn build(
        config: &RackConfig,
        items: impl IntoIterator<Item = &'a EquipmentItem>,
        policy: CollisionPolicy,
        warnings: &mut Vec<LayoutWarning>,
    ) -> Self {
        let mut map = Self::default();

        for item in items {
            if !config.contains(i64::from(item.u_bottom)) || !config.contains(item.u_top) {
                warnings.push(LayoutWarning::OutOfRange {
                    model: item.model.clone(),
                    u_bottom: item.u_bottom,
                    u_top: item.u_top,
                    height: config.height,
                });
                continue;
            }
            map.place(item, policy, warnings);
        }

        map
    }

    fn place(
        &mut self,
        item: &'a EquipmentItem,
        policy: CollisionPolicy,
        warnings: &mut Vec<LayoutWarning>,
    ) {
        let Some(occupant) = self.slots.get(&item.u_top).copied() else {
            self.slots.insert(item.u_top, item);
            return;
        };

        let (kept, dropped) = if policy.replaces_occupant() {
            self.slots.insert(item.u_top, item);
            (item, occupant)
        } else {
            (occupant, item)
        };
        warnings.push(LayoutWarning::Collision {
            unit: item.u_top,
            kept: kept.model.clone(),
            dropped: dropped.model.clone(),
        });
    }

    /// The drawable item anchored at `unit`. Items without a model are not drawn.
    pub fn drawable(&self, unit: i64) -> Option<&'a EquipmentItem> {
        self.slots
            .get(&unit)
            .copied()
            .filter(|item| !item.model.is_empty())
    }
}

/// Resolved rows from the visual top of the rack down, plus any warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<'a> {
    pub rows: Vec<RenderRow<'a>>,
    pub warnings: Vec<LayoutWarning>,
}

/// Walks every unit once, top to bottom.
///
/// An anchored item consumes `u_size - 1` further units as continuation rows;
/// a consumed unit is never visited again, so an item anchored on it is hidden.
pub fn resolve_layout<'a>(
    config: &RackConfig,
    items: impl IntoIterator<Item = &'a EquipmentItem>,
    policy: CollisionPolicy,
) -> Layout<'a> {
    let mut warnings = Vec::new();
    let slots = SlotMap::build(config, items, policy, &mut warnings);

    let mut rows = Vec::new();
    let (mut unit, step) = config.walk();

    while config.contains(unit) {
        match slots.drawable(unit) {
            Some(item) => {
                rows.push(RenderRow::Anchor {
                    unit: to_unit(unit),
                    item,
                });
                for _ in 1..item.u_size {
                    unit += step;
                    if !config.contains(unit) {
                        break;
                    }
                    if let Some(hidden) = slots.drawable(unit) {
                        warnings.push(LayoutWarning::Hidden {
                            unit: to_unit(unit),
                            model: hidden.model.clone(),
                            covered_by: item.model.clone(),
                        });
                    }
                    rows.push(RenderRow::Continuation {
                        unit: to_unit(unit),
                        item,
                    });
                }
            }
            None => rows.push(RenderRow::Empty {
                unit: to_unit(unit),
            }),
        }
        unit += step;
    }

    Layout { rows, warnings }
}

/// Units inside the walk are always within `1..=height`.
fn to_unit(unit: i64) -> u32 {
    u32::try_from(unit).unwrap_or_default()
}
