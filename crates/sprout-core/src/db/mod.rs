//! Local plant store for Sprout

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{PlantStore, SqlitePlantStore};
