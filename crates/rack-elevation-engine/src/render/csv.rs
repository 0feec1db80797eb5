use std::fmt;

use crate::models::{EquipmentItem, RackConfig};

/// Flat export with one line per parsed item, in input order.
///
/// Quoted fields are written as-is: embedded double quotes are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport(String);

impl CsvExport {
    pub const HEADER: &'static str = "Model,Name,Rack,U,Height,Comment";

    pub fn new<'a>(config: &RackConfig, items: impl IntoIterator<Item = &'a EquipmentItem>) -> Self {
        let mut csv = format!("{}\n", Self::HEADER);
        for item in items {
            csv.push_str(&format!(
                "\"{}\",\"{}\",{},{},{},\"{}\"\n",
                item.model,
                item.name,
                config.name,
                item.u_bottom,
                item.u_size,
                item.comment.as_deref().unwrap_or_default(),
            ));
        }
        Self(csv)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CsvExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
