use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use sprout_core::db::Database;
use sprout_core::reminder::format_relative;
use sprout_core::util::compact_text;
use sprout_core::{Locale, Plant, PlantId, SproutConfig};

use crate::error::CliError;

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlantListItem {
    pub id: String,
    pub name: String,
    pub about: String,
    pub water_tips: String,
    pub environments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<String>,
    pub owned: bool,
}

pub fn resolve_config(overrides: &ConfigOverrides) -> Result<SproutConfig, CliError> {
    let config = SproutConfig::load()?;
    apply_overrides(config, overrides)
}

pub fn apply_overrides(
    mut config: SproutConfig,
    overrides: &ConfigOverrides,
) -> Result<SproutConfig, CliError> {
    if let Some(url) = overrides.api_url.as_deref() {
        config = config.with_api_base_url(url)?;
    }
    if let Some(path) = overrides.db_path.clone() {
        config = config.with_db_path(path);
    }
    if let Some(code) = overrides.locale.as_deref() {
        config = config.with_locale(code.parse::<Locale>()?);
    }
    Ok(config)
}

pub fn open_database(config: &SproutConfig) -> Result<Database, CliError> {
    let path = config.resolved_db_path();
    tracing::debug!(path = %path.display(), "opening plant store");
    Ok(Database::open(path)?)
}

pub fn parse_plant_identifier(id: &str) -> Result<PlantId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyPlantId);
    }
    Ok(trimmed.parse()?)
}

pub fn format_catalog_lines(plants: &[Plant], owned: &HashSet<PlantId>) -> Vec<String> {
    plants
        .iter()
        .map(|plant| {
            let marker = if owned.contains(&plant.id) { "*" } else { " " };
            let environments = plant.environments.join(", ");
            format!("{marker} {:<6}  {:<28}  {environments}", plant.id, plant.name)
        })
        .collect()
}

pub fn format_garden_lines(plants: &[Plant], now: DateTime<Utc>, locale: Locale) -> Vec<String> {
    plants
        .iter()
        .map(|plant| {
            let when = plant.notification_at.map_or_else(String::new, |at| {
                let local = at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                format!("{local}  ({})", format_relative(at, now, locale))
            });
            format!("{:<6}  {:<28}  {when}", plant.id, plant.name)
        })
        .collect()
}

pub fn plant_to_list_item(
    plant: &Plant,
    owned: bool,
    now: DateTime<Utc>,
    locale: Locale,
) -> PlantListItem {
    PlantListItem {
        id: plant.id.to_string(),
        name: plant.name.clone(),
        about: compact_text(&plant.about),
        water_tips: plant.water_tips.clone(),
        environments: plant.environments.clone(),
        notification_at: plant.notification_at.map(|at| at.to_rfc3339()),
        relative_time: plant
            .notification_at
            .map(|at| format_relative(at, now, locale)),
        owned,
    }
}

/// Ask a yes/no question; anything but `y`/`yes` (or `s`/`sim`) is a no.
pub fn confirm_with<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    ))
}

pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Ok(confirm_with(prompt, &mut stdin.lock(), &mut stdout)?)
}
