use sprout_core::catalog::{CatalogSource, HttpCatalogClient};
use sprout_core::models::with_all_entry;
use sprout_core::SproutConfig;

use crate::error::CliError;

pub async fn run_environments(config: &SproutConfig, as_json: bool) -> Result<(), CliError> {
    let client = HttpCatalogClient::new(config)?;
    let environments = with_all_entry(config.locale, client.fetch_environments().await?);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&environments)?);
    } else {
        for environment in &environments {
            println!("{:<16}  {}", environment.key, environment.title);
        }
    }

    Ok(())
}
