//! Remote plant catalog.
//!
//! The catalog is a paginated REST resource (`plants`) plus an environment
//! list (`plants_environments`). `CatalogSource` is the seam the list
//! controller depends on; `HttpCatalogClient` talks to the real backend.

mod http;

pub use http::{environments_query, parse_records, plants_query, HttpCatalogClient};

use crate::error::Result;
use crate::models::{Environment, Plant, PlantId};

/// Read access to the remote plant catalog
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// One page of plants sorted by name ascending; pages start at 1
    ///
    /// An empty page means there is nothing more to fetch.
    async fn fetch_plants(&self, page: u32, page_size: u32) -> Result<Vec<Plant>>;

    /// All environments sorted by title ascending
    async fn fetch_environments(&self) -> Result<Vec<Environment>>;

    /// A single catalog plant
    async fn fetch_plant(&self, id: &PlantId) -> Result<Plant>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    async fn fetch_plants(&self, page: u32, page_size: u32) -> Result<Vec<Plant>> {
        (**self).fetch_plants(page, page_size).await
    }

    async fn fetch_environments(&self) -> Result<Vec<Environment>> {
        (**self).fetch_environments().await
    }

    async fn fetch_plant(&self, id: &PlantId) -> Result<Plant> {
        (**self).fetch_plant(id).await
    }
}
