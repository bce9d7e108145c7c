//! Environment tag model

use serde::{Deserialize, Serialize};

use super::Plant;
use crate::locale::Locale;

/// Reserved environment key meaning "no filter"
pub const ALL_ENVIRONMENTS_KEY: &str = "all";

/// An environment a plant can live in, used to filter the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Tag key matched against `Plant::environments`
    pub key: String,
    /// Display title
    pub title: String,
}

impl Environment {
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }

    /// The synthetic "all" entry shown before the remote environments
    #[must_use]
    pub fn all(locale: Locale) -> Self {
        Self::new(ALL_ENVIRONMENTS_KEY, locale.all_environments_label())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.key == ALL_ENVIRONMENTS_KEY
    }
}

/// Prepend exactly one synthetic "all" entry to the remote environments.
///
/// Remote entries that reuse the reserved key are dropped.
#[must_use]
pub fn with_all_entry(locale: Locale, remote: Vec<Environment>) -> Vec<Environment> {
    let mut environments = Vec::with_capacity(remote.len() + 1);
    environments.push(Environment::all(locale));
    environments.extend(remote.into_iter().filter(|environment| !environment.is_all()));
    environments
}

/// The environment filter applied to a plant list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnvironmentFilter {
    /// No filter
    #[default]
    All,
    /// Only plants tagged with this key
    Tag(String),
}

impl EnvironmentFilter {
    /// Build a filter from a selected environment key.
    ///
    /// `"all"` (and a blank key) select everything.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() || key == ALL_ENVIRONMENTS_KEY {
            Self::All
        } else {
            Self::Tag(key.to_string())
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_ENVIRONMENTS_KEY,
            Self::Tag(key) => key,
        }
    }

    #[must_use]
    pub fn matches(&self, plant: &Plant) -> bool {
        match self {
            Self::All => true,
            Self::Tag(key) => plant.has_environment(key),
        }
    }

    /// Order-preserving subsequence of `plants` accepted by this filter
    #[must_use]
    pub fn apply(&self, plants: &[Plant]) -> Vec<Plant> {
        plants
            .iter()
            .filter(|plant| self.matches(plant))
            .cloned()
            .collect()
    }
}
