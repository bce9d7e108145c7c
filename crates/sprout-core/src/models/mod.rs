//! Data models for Sprout

mod environment;
mod plant;

pub use environment::{with_all_entry, Environment, EnvironmentFilter, ALL_ENVIRONMENTS_KEY};
pub use plant::{Plant, PlantId, WaterFrequency};
