//! Drives `PlantListState` against the catalog and the local store.

use crate::catalog::CatalogSource;
use crate::config::SproutConfig;
use crate::db::PlantStore;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::models::{with_all_entry, EnvironmentFilter, PlantId};

use super::state::{ListEvent, PlantListState};

/// Catalog browsing controller: environment filter, paging, removal.
///
/// Operations take `&mut self`, so they run one at a time; the in-flight
/// guard in the state additionally protects callers that split a fetch into
/// `begin_load_more` and `complete` themselves.
pub struct PlantListController<C, S> {
    catalog: C,
    store: S,
    page_size: u32,
    locale: Locale,
    state: PlantListState,
}

impl<C: CatalogSource, S: PlantStore> PlantListController<C, S> {
    pub fn new(catalog: C, store: S, config: &SproutConfig) -> Self {
        Self {
            catalog,
            store,
            page_size: config.page_size,
            locale: config.locale,
            state: PlantListState::new(),
        }
    }

    pub const fn state(&self) -> &PlantListState {
        &self.state
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch environments and the first page.
    ///
    /// Both fetches are attempted; the first failure is returned after the
    /// other one has been applied.
    pub async fn load_initial(&mut self) -> Result<()> {
        let environments = self.load_environments().await;
        let first_page = self.load_first_page().await;
        environments.and(first_page)
    }

    /// Fetch the environment list and prepend the "all" entry
    pub async fn load_environments(&mut self) -> Result<()> {
        match self.catalog.fetch_environments().await {
            Ok(remote) => {
                self.state.apply(ListEvent::EnvironmentsLoaded(with_all_entry(
                    self.locale,
                    remote,
                )));
                Ok(())
            }
            Err(error) => {
                self.state
                    .apply(ListEvent::EnvironmentsFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Fetch page 1, replacing whatever was loaded
    pub async fn load_first_page(&mut self) -> Result<()> {
        let Some(request) = self.state.begin_initial_load() else {
            return Ok(());
        };
        let outcome = self
            .catalog
            .fetch_plants(request.page(), self.page_size)
            .await;
        self.state.complete(request, &outcome);
        outcome.map(|_| ())
    }

    /// Select an environment key (`"all"` clears the filter). Never fetches.
    pub fn set_filter(&mut self, key: &str) {
        self.state
            .apply(ListEvent::FilterSelected(EnvironmentFilter::from_key(key)));
    }

    /// Fetch and append the next page when the list end is near.
    ///
    /// Returns whether a fetch was issued. On failure the list is unchanged,
    /// the error is recorded in the state, and it is returned to the caller.
    pub async fn load_more(&mut self, distance_from_end: f64) -> Result<bool> {
        let Some(request) = self.state.begin_load_more(distance_from_end) else {
            return Ok(false);
        };
        let outcome = self
            .catalog
            .fetch_plants(request.page(), self.page_size)
            .await;
        self.state.complete(request, &outcome);
        outcome.map(|_| true)
    }

    /// Remove a plant the user confirmed, from the store and from the list
    pub fn remove(&mut self, id: &PlantId) -> Result<()> {
        remove_owned(&self.store, &mut self.state, id)
    }

    /// Tear the view down; fetches resolving later become no-ops
    pub fn close(&mut self) {
        self.state.apply(ListEvent::Closed);
    }
}

/// Delete through the store first, then drop the entry from `state`.
///
/// On a store failure `state` is left untouched.
pub(crate) fn remove_owned<S: PlantStore>(
    store: &S,
    state: &mut PlantListState,
    id: &PlantId,
) -> Result<()> {
    store.remove(id).map_err(|error| Error::Removal {
        id: id.to_string(),
        reason: error.to_string(),
    })?;
    state.apply(ListEvent::EntryRemoved(id.clone()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, SqlitePlantStore};
    use crate::models::{Environment, Plant};
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// In-memory catalog serving fixed pages and recording requests
    struct PagedCatalog {
        pages: Vec<Vec<Plant>>,
        environments: Vec<Environment>,
        requested: RefCell<Vec<u32>>,
        fail_pages: Vec<u32>,
        fail_once: RefCell<Vec<u32>>,
    }

    impl PagedCatalog {
        fn new(pages: Vec<Vec<Plant>>) -> Self {
            Self {
                pages,
                environments: vec![
                    Environment::new("indoor", "Indoor"),
                    Environment::new("outdoor", "Outdoor"),
                ],
                requested: RefCell::new(Vec::new()),
                fail_pages: Vec::new(),
                fail_once: RefCell::new(Vec::new()),
            }
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_pages.push(page);
            self
        }

        fn failing_once_on(self, page: u32) -> Self {
            self.fail_once.borrow_mut().push(page);
            self
        }
    }

    impl CatalogSource for PagedCatalog {
        async fn fetch_plants(&self, page: u32, _page_size: u32) -> Result<Vec<Plant>> {
            self.requested.borrow_mut().push(page);
            if self.fail_pages.contains(&page) {
                return Err(Error::Network("connection reset".to_string()));
            }
            let mut fail_once = self.fail_once.borrow_mut();
            if let Some(index) = fail_once.iter().position(|&failing| failing == page) {
                fail_once.remove(index);
                return Err(Error::Network("connection reset".to_string()));
            }
            drop(fail_once);
            let index = usize::try_from(page - 1).unwrap();
            Ok(self.pages.get(index).cloned().unwrap_or_default())
        }

        async fn fetch_environments(&self) -> Result<Vec<Environment>> {
            Ok(self.environments.clone())
        }

        async fn fetch_plant(&self, id: &PlantId) -> Result<Plant> {
            self.pages
                .iter()
                .flatten()
                .find(|plant| &plant.id == id)
                .cloned()
                .ok_or_else(|| Error::NotFound(id.to_string()))
        }
    }

    /// Store whose deletes always fail
    struct BrokenStore;

    impl PlantStore for BrokenStore {
        fn load_all(&self) -> Result<Vec<Plant>> {
            Ok(Vec::new())
        }

        fn get(&self, _id: &PlantId) -> Result<Option<Plant>> {
            Ok(None)
        }

        fn save(&self, _plant: &Plant) -> Result<()> {
            Err(Error::Storage("read-only".to_string()))
        }

        fn remove(&self, _id: &PlantId) -> Result<()> {
            Err(Error::Storage("read-only".to_string()))
        }
    }

    fn plant(id: u64, environment: &str) -> Plant {
        Plant::new(PlantId::from(id), format!("Plant {id:02}")).with_environments([environment])
    }

    fn two_pages() -> Vec<Vec<Plant>> {
        vec![
            (1..=8).map(|id| plant(id, if id % 2 == 0 { "indoor" } else { "outdoor" })).collect(),
            (9..=12).map(|id| plant(id, "indoor")).collect(),
        ]
    }

    #[tokio::test]
    async fn load_more_recovers_page_one_after_failed_first_load() {
        let catalog = PagedCatalog::new(two_pages()).failing_once_on(1);
        let db = Database::open_in_memory().unwrap();
        let mut controller = PlantListController::new(
            &catalog,
            SqlitePlantStore::new(db.connection()),
            &SproutConfig::default(),
        );

        assert!(controller.load_first_page().await.is_err());
        assert!(controller.load_more(0.0).await.unwrap());

        assert_eq!(*catalog.requested.borrow(), vec![1, 1]);
        assert_eq!(controller.state().plants().len(), 8);
        assert_eq!(controller.state().page(), 1);

        assert!(controller.load_more(0.0).await.unwrap());
        assert_eq!(*catalog.requested.borrow(), vec![1, 1, 2]);
        assert_eq!(controller.state().plants().len(), 12);
    }

    #[tokio::test]
    async fn initial_load_prepends_all_environment() {
        let catalog = PagedCatalog::new(two_pages());
        let db = Database::open_in_memory().unwrap();
        let mut controller = PlantListController::new(
            &catalog,
            SqlitePlantStore::new(db.connection()),
            &SproutConfig::default(),
        );

        controller.load_initial().await.unwrap();

        let keys = controller
            .state()
            .environments()
            .iter()
            .map(|environment| environment.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["all", "indoor", "outdoor"]);
        assert_eq!(controller.state().plants().len(), 8);
        assert!(!controller.state().is_loading());
        assert_eq!(*catalog.requested.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn load_more_fetches_next_page_only_near_end() {
        let catalog = PagedCatalog::new(two_pages());
        let db = Database::open_in_memory().unwrap();
        let mut controller = PlantListController::new(
            &catalog,
            SqlitePlantStore::new(db.connection()),
            &SproutConfig::default(),
        );
        controller.load_first_page().await.unwrap();

        assert!(!controller.load_more(3.0).await.unwrap());
        assert_eq!(controller.state().page(), 1);

        assert!(controller.load_more(0.2).await.unwrap());
        assert_eq!(controller.state().page(), 2);
        assert_eq!(controller.state().plants().len(), 12);

        // Third page is empty: catalog exhausted, further triggers are no-ops
        assert!(controller.load_more(0.0).await.unwrap());
        assert!(controller.state().is_exhausted());
        assert!(!controller.load_more(0.0).await.unwrap());
        assert_eq!(*catalog.requested.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn filter_then_page_keeps_view_consistent() {
        let catalog = PagedCatalog::new(two_pages());
        let db = Database::open_in_memory().unwrap();
        let mut controller = PlantListController::new(
            &catalog,
            SqlitePlantStore::new(db.connection()),
            &SproutConfig::default(),
        );
        controller.load_first_page().await.unwrap();

        controller.set_filter("indoor");
        assert_eq!(controller.state().displayed().len(), 4);
        assert_eq!(*catalog.requested.borrow(), vec![1]);

        controller.load_more(0.0).await.unwrap();
        assert_eq!(controller.state().displayed().len(), 8);

        controller.set_filter("all");
        assert_eq!(
            controller.state().displayed(),
            controller.state().plants()
        );
    }

    #[tokio::test]
    async fn failed_fetch_keeps_state_and_surfaces_error() {
        let catalog = PagedCatalog::new(two_pages()).failing_on(2);
        let db = Database::open_in_memory().unwrap();
        let mut controller = PlantListController::new(
            &catalog,
            SqlitePlantStore::new(db.connection()),
            &SproutConfig::default(),
        );
        controller.load_first_page().await.unwrap();
        let before = controller.state().plants().to_vec();

        let error = controller.load_more(0.0).await.unwrap_err();
        assert!(error.is_retryable());
        assert_eq!(controller.state().plants(), before.as_slice());
        assert!(controller.state().last_error().is_some());
        assert_eq!(controller.state().page(), 1);
    }

    #[tokio::test]
    async fn remove_deletes_from_store_and_list() {
        let catalog = PagedCatalog::new(two_pages());
        let db = Database::open_in_memory().unwrap();
        let store = SqlitePlantStore::new(db.connection());
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        store.save(&plant(4, "indoor").scheduled_at(at)).unwrap();

        let mut controller = PlantListController::new(&catalog, store, &SproutConfig::default());
        controller.load_first_page().await.unwrap();

        controller.remove(&PlantId::from(4)).unwrap();
        assert_eq!(controller.state().plants().len(), 7);
        assert!(controller.state().find(&PlantId::from(4)).is_none());
        assert!(store.get(&PlantId::from(4)).unwrap().is_none());

        // Absent id: nothing changes
        controller.remove(&PlantId::from(404)).unwrap();
        assert_eq!(controller.state().plants().len(), 7);
    }

    #[tokio::test]
    async fn remove_failure_leaves_list_unchanged() {
        let catalog = PagedCatalog::new(two_pages());
        let mut controller =
            PlantListController::new(&catalog, BrokenStore, &SproutConfig::default());
        controller.load_first_page().await.unwrap();
        let before = controller.state().clone();

        let error = controller.remove(&PlantId::from(4)).unwrap_err();
        assert!(matches!(error, Error::Removal { .. }));
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn close_stops_paging() {
        let catalog = PagedCatalog::new(two_pages());
        let mut controller =
            PlantListController::new(&catalog, BrokenStore, &SproutConfig::default());
        controller.load_first_page().await.unwrap();
        controller.close();

        assert!(!controller.load_more(0.0).await.unwrap());
        assert_eq!(*catalog.requested.borrow(), vec![1]);
    }
}
