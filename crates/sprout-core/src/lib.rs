//! sprout-core - Core library for Sprout
//!
//! This crate contains the plant models, the remote catalog client, the local
//! plant store, and the list state shared by every Sprout front end.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod garden;
pub mod list;
pub mod locale;
pub mod models;
pub mod reminder;
pub mod schedule;
pub mod util;

pub use config::SproutConfig;
pub use error::{Error, Result};
pub use locale::Locale;
pub use models::{Environment, EnvironmentFilter, Plant, PlantId};
