//! The user's owned plants and their next watering.

use chrono::{DateTime, Utc};

use crate::db::PlantStore;
use crate::error::Result;
use crate::list::{remove_owned, PlantListState};
use crate::locale::Locale;
use crate::models::{Plant, PlantId};
use crate::reminder::next_watering_message;

/// Owned plants loaded from the local store
pub struct MyPlants<S> {
    store: S,
    locale: Locale,
    state: PlantListState,
    next_watering: String,
}

impl<S: PlantStore> MyPlants<S> {
    /// Load owned plants and compute the next-watering message
    pub fn load(store: S, locale: Locale, now: DateTime<Utc>) -> Result<Self> {
        let plants = store.load_all()?;
        let next_watering = next_watering_message(&plants, locale, now);
        tracing::debug!(count = plants.len(), "loaded owned plants");

        Ok(Self {
            store,
            locale,
            state: PlantListState::from_plants(plants),
            next_watering,
        })
    }

    /// Owned plants, earliest watering first
    pub fn plants(&self) -> &[Plant] {
        self.state.displayed()
    }

    pub fn next_watering(&self) -> &str {
        &self.next_watering
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Question to ask before removing `id`, or `None` if it is not listed
    pub fn removal_prompt(&self, id: &PlantId) -> Option<String> {
        self.state
            .find(id)
            .map(|plant| self.locale.removal_prompt(&plant.name))
    }

    /// Remove a plant the user confirmed.
    ///
    /// The message is left as loaded; call `refresh_message` to recompute it.
    pub fn remove(&mut self, id: &PlantId) -> Result<()> {
        remove_owned(&self.store, &mut self.state, id)
    }

    pub fn refresh_message(&mut self, now: DateTime<Utc>) {
        self.next_watering = next_watering_message(self.state.plants(), self.locale, now);
    }
}
