use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] sprout_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Plant ID cannot be empty")]
    EmptyPlantId,
    #[error("You don't have a plant with id {0}")]
    PlantNotFound(String),
    #[error("--pages must be at least 1")]
    InvalidPageCount,
}
