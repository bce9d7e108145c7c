//! Plant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier of a plant, stable within its source collection.
///
/// The catalog API serves numeric ids while the local store keeps text; both
/// forms deserialize into the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPlantId", into = "String")]
pub struct PlantId(String);

impl PlantId {
    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for PlantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Plant ID cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<u64> for PlantId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<PlantId> for String {
    fn from(value: PlantId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlantId {
    Number(i64),
    Text(String),
}

impl From<RawPlantId> for PlantId {
    fn from(value: RawPlantId) -> Self {
        match value {
            RawPlantId::Number(number) => Self(number.to_string()),
            RawPlantId::Text(text) => Self(text.trim().to_string()),
        }
    }
}

/// How often a plant wants water, as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterFrequency {
    /// Number of waterings per period
    pub times: u32,
    /// Period name (e.g. "week", "day")
    pub repeat_every: String,
}

/// A plant from the catalog, or one the user owns.
///
/// Owned plants carry the scheduled watering notification time; catalog
/// entries leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    /// Unique identifier
    pub id: PlantId,
    /// Display name
    pub name: String,
    /// Descriptive text
    #[serde(default)]
    pub about: String,
    /// Care tip for watering
    #[serde(default)]
    pub water_tips: String,
    /// Image URI
    #[serde(default)]
    pub photo: String,
    /// Environment tags (e.g. "living_room", "indoor")
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<WaterFrequency>,
    /// Scheduled watering notification (owned plants only)
    #[serde(
        rename = "dateTimeNotification",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_at: Option<DateTime<Utc>>,
}

impl Plant {
    /// Create a catalog plant with the given id and name
    #[must_use]
    pub fn new(id: PlantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            about: String::new(),
            water_tips: String::new(),
            photo: String::new(),
            environments: Vec::new(),
            frequency: None,
            notification_at: None,
        }
    }

    /// Replace the environment tags
    #[must_use]
    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Turn this plant into an owned plant watered at `at`
    #[must_use]
    pub const fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.notification_at = Some(at);
        self
    }

    /// Check whether the plant is tagged with the given environment
    #[must_use]
    pub fn has_environment(&self, key: &str) -> bool {
        self.environments.iter().any(|environment| environment == key)
    }

    /// Owned plants carry a notification time
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        self.notification_at.is_some()
    }
}
