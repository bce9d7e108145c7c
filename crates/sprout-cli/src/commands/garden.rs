use chrono::Utc;
use sprout_core::db::SqlitePlantStore;
use sprout_core::garden::MyPlants;
use sprout_core::SproutConfig;

use crate::commands::common::{
    format_garden_lines, open_database, plant_to_list_item, PlantListItem,
};
use crate::error::CliError;

pub fn run_garden(config: &SproutConfig, as_json: bool) -> Result<(), CliError> {
    let db = open_database(config)?;
    let now = Utc::now();
    let garden = MyPlants::load(SqlitePlantStore::new(db.connection()), config.locale, now)?;

    if as_json {
        let items = garden
            .plants()
            .iter()
            .map(|plant| plant_to_list_item(plant, true, now, garden.locale()))
            .collect::<Vec<PlantListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("{}", garden.next_watering());
    for line in format_garden_lines(garden.plants(), now, garden.locale()) {
        println!("{line}");
    }
    Ok(())
}
