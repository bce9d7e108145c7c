use chrono::{Local, Utc};
use sprout_core::catalog::{CatalogSource, HttpCatalogClient};
use sprout_core::db::SqlitePlantStore;
use sprout_core::schedule::{parse_reminder_time, schedule_watering};
use sprout_core::SproutConfig;

use crate::commands::common::{open_database, parse_plant_identifier};
use crate::error::CliError;

pub async fn run_adopt(config: &SproutConfig, id: &str, at: &str) -> Result<(), CliError> {
    let id = parse_plant_identifier(id)?;
    let client = HttpCatalogClient::new(config)?;
    let plant = client.fetch_plant(&id).await?;

    let chosen = parse_reminder_time(at, &Local::now())?;
    let db = open_database(config)?;
    let store = SqlitePlantStore::new(db.connection());
    let confirmation = schedule_watering(&store, &plant, chosen, Utc::now(), config.locale)?;

    println!("{}", confirmation.title);
    println!("{}", confirmation.sub_title);
    Ok(())
}
