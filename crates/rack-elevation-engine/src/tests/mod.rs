//! Shared helpers for unit tests.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::models::{EquipmentItem, RackConfig};

/// An ascending item with default color and no name, link or comment.
pub fn item(u_bottom: u32, u_size: u32, model: &str) -> EquipmentItem {
    EquipmentItem {
        u_bottom,
        u_size,
        u_top: i64::from(u_bottom) + i64::from(u_size) - 1,
        model: model.to_string(),
        name: String::new(),
        color: "#888".to_string(),
        link: None,
        link_title: None,
        comment: None,
    }
}

/// Like [`item`], with the anchor computed for `config`'s numbering direction.
pub fn placed(config: &RackConfig, u_bottom: u32, u_size: u32, model: &str) -> EquipmentItem {
    EquipmentItem {
        u_top: EquipmentItem::top_unit(u_bottom, u_size, config.direction()),
        ..item(u_bottom, u_size, model)
    }
}

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
