use std::ops::RangeInclusive;

use super::Direction;

/// One piece of equipment parsed from a rack line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentItem {
    /// Starting unit as written: always the physically lower end of the item.
    pub u_bottom: u32,
    /// Number of consecutive units occupied, at least 1.
    pub u_size: u32,
    /// Highest occupied unit, where the item is anchored in the layout.
    ///
    /// Signed because a descending rack can push it below unit 1.
    pub u_top: i64,
    pub model: String,
    /// Display label, empty when the line gives none.
    pub name: String,
    /// Background color, explicit or picked from the model.
    pub color: String,
    /// Resolved link target.
    pub link: Option<String>,
    /// Link title, already HTML-escaped.
    pub link_title: Option<String>,
    pub comment: Option<String>,
}

impl EquipmentItem {
    /// Computes the anchor unit: `u_bottom + direction * (u_size - 1)`.
    pub fn top_unit(u_bottom: u32, u_size: u32, direction: Direction) -> i64 {
        i64::from(u_bottom) + direction.step() * (i64::from(u_size) - 1)
    }

    pub fn has_comment(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// All units covered by the item, lowest number first.
    pub fn units(&self) -> RangeInclusive<i64> {
        let bottom = i64::from(self.u_bottom);
        bottom.min(self.u_top)..=bottom.max(self.u_top)
    }

    /// Writes the item back as a rack line with quoted model and name and an explicit color.
    pub fn to_source_line(&self) -> String {
        let mut line = format!(
            "{} {} \"{}\" \"{}\" {}",
            self.u_bottom, self.u_size, self.model, self.name, self.color
        );
        if let Some(link) = &self.link {
            line.push_str(" link:");
            line.push_str(link);
        }
        if let Some(comment) = &self.comment {
            line.push(' ');
            line.push_str(comment);
        }
        line
    }
}
