//! Owned plant store implementation

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::{Plant, PlantId, WaterFrequency};

/// Storage operations for the user's owned plants
pub trait PlantStore {
    /// All owned plants, earliest notification first
    fn load_all(&self) -> Result<Vec<Plant>>;

    /// Get an owned plant by ID
    fn get(&self, id: &PlantId) -> Result<Option<Plant>>;

    /// Insert or replace an owned plant
    ///
    /// The plant must carry a notification time.
    fn save(&self, plant: &Plant) -> Result<()>;

    /// Delete an owned plant; deleting an absent id succeeds
    fn remove(&self, id: &PlantId) -> Result<()>;
}

/// `SQLite` implementation of `PlantStore`
#[derive(Clone, Copy)]
pub struct SqlitePlantStore<'a> {
    conn: &'a Connection,
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, about, water_tips, photo, environments, frequency, notification_at
     FROM owned_plants";

impl<'a> SqlitePlantStore<'a> {
    /// Create a new store with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse an owned plant from a database row
    fn parse_plant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Plant> {
        let id: String = row.get(0)?;
        let environments: String = row.get(5)?;
        let frequency: Option<String> = row.get(6)?;
        let notification_ms: i64 = row.get(7)?;

        let environments = serde_json::from_str::<Vec<String>>(&environments)
            .map_err(|error| conversion_error(5, error))?;
        let frequency = frequency
            .map(|raw| serde_json::from_str::<WaterFrequency>(&raw))
            .transpose()
            .map_err(|error| conversion_error(6, error))?;
        let notification_at = DateTime::from_timestamp_millis(notification_ms)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(7, notification_ms))?;

        Ok(Plant {
            id: id
                .parse::<PlantId>()
                .map_err(|error| conversion_error(0, error))?,
            name: row.get(1)?,
            about: row.get(2)?,
            water_tips: row.get(3)?,
            photo: row.get(4)?,
            environments,
            frequency,
            notification_at: Some(notification_at),
        })
    }
}

fn conversion_error(
    column: usize,
    error: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}

impl PlantStore for SqlitePlantStore<'_> {
    fn load_all(&self) -> Result<Vec<Plant>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY notification_at ASC, name ASC"
        ))?;

        let plants = stmt
            .query_map([], Self::parse_plant)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(plants)
    }

    fn get(&self, id: &PlantId) -> Result<Option<Plant>> {
        let plant = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?"),
                params![id.as_str()],
                Self::parse_plant,
            )
            .optional()?;
        Ok(plant)
    }

    fn save(&self, plant: &Plant) -> Result<()> {
        let notification_at: DateTime<Utc> = plant.notification_at.ok_or_else(|| {
            Error::Validation(format!("{} has no watering time scheduled", plant.name))
        })?;
        let environments = serde_json::to_string(&plant.environments)?;
        let frequency = plant
            .frequency
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            "INSERT INTO owned_plants
                (id, name, about, water_tips, photo, environments, frequency, notification_at, saved_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                about = excluded.about,
                water_tips = excluded.water_tips,
                photo = excluded.photo,
                environments = excluded.environments,
                frequency = excluded.frequency,
                notification_at = excluded.notification_at,
                saved_at = excluded.saved_at",
            params![
                plant.id.as_str(),
                plant.name,
                plant.about,
                plant.water_tips,
                plant.photo,
                environments,
                frequency,
                notification_at.timestamp_millis(),
                Utc::now().timestamp_millis(),
            ],
        )?;

        tracing::info!("Saved {} ({}) for {}", plant.name, plant.id, notification_at);
        Ok(())
    }

    fn remove(&self, id: &PlantId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM owned_plants WHERE id = ?", params![id.as_str()])?;

        if rows == 0 {
            tracing::debug!("No owned plant with id {} to remove", id);
        } else {
            tracing::info!("Removed owned plant {}", id);
        }
        Ok(())
    }
}
