use chrono::Utc;
use sprout_core::db::SqlitePlantStore;
use sprout_core::garden::MyPlants;
use sprout_core::SproutConfig;

use crate::commands::common::{confirm, open_database, parse_plant_identifier};
use crate::error::CliError;

pub fn run_remove(config: &SproutConfig, id: &str, skip_prompt: bool) -> Result<(), CliError> {
    let id = parse_plant_identifier(id)?;
    let db = open_database(config)?;
    let store = SqlitePlantStore::new(db.connection());
    let mut garden = MyPlants::load(store, config.locale, Utc::now())?;

    let prompt = garden
        .removal_prompt(&id)
        .ok_or_else(|| CliError::PlantNotFound(id.to_string()))?;
    if !skip_prompt && !confirm(&prompt)? {
        tracing::debug!(plant = %id, "removal cancelled");
        return Ok(());
    }

    garden.remove(&id).inspect_err(|_| {
        eprintln!("{}", config.locale.removal_failed());
    })?;
    println!("{id}");
    Ok(())
}
