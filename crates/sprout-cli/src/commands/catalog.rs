use std::collections::HashSet;

use chrono::Utc;
use sprout_core::catalog::{CatalogSource, HttpCatalogClient};
use sprout_core::db::{PlantStore, SqlitePlantStore};
use sprout_core::list::PlantListController;
use sprout_core::{Plant, PlantId, SproutConfig};

use crate::commands::common::{
    format_catalog_lines, open_database, plant_to_list_item, PlantListItem,
};
use crate::error::CliError;

pub async fn run_catalog(
    config: &SproutConfig,
    environment: Option<&str>,
    pages: u32,
    as_json: bool,
) -> Result<(), CliError> {
    let client = HttpCatalogClient::new(config)?;
    let db = open_database(config)?;
    let store = SqlitePlantStore::new(db.connection());
    let owned = store
        .load_all()?
        .into_iter()
        .map(|plant| plant.id)
        .collect::<HashSet<PlantId>>();

    let displayed = browse_catalog(&client, store, config, environment, pages).await?;
    if as_json {
        let now = Utc::now();
        let items = displayed
            .iter()
            .map(|plant| plant_to_list_item(plant, owned.contains(&plant.id), now, config.locale))
            .collect::<Vec<PlantListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_catalog_lines(&displayed, &owned) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Load up to `pages` catalog pages and return the plants matching
/// `environment`.
///
/// Environments are not fetched; an unknown key simply matches nothing.
pub async fn browse_catalog<C: CatalogSource, S: PlantStore>(
    catalog: C,
    store: S,
    config: &SproutConfig,
    environment: Option<&str>,
    pages: u32,
) -> Result<Vec<Plant>, CliError> {
    if pages == 0 {
        return Err(CliError::InvalidPageCount);
    }

    let mut controller = PlantListController::new(catalog, store, config);
    controller.load_first_page().await?;
    for _ in 1..pages {
        // Asking from the very end of the list always wants another page.
        if !controller.load_more(0.0).await? {
            break;
        }
    }
    if let Some(key) = environment {
        controller.set_filter(key);
    }
    if controller.state().is_exhausted() {
        tracing::info!("reached the end of the catalog");
    }

    let displayed = controller.state().displayed().to_vec();
    controller.close();
    Ok(displayed)
}
