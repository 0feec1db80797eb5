pub mod equipment;
pub mod rack_config;

pub use equipment::EquipmentItem;
pub use rack_config::{Direction, RackConfig};
