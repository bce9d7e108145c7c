//! Pure plant list state transitions.

use crate::models::{Environment, EnvironmentFilter, Plant, PlantId};

/// `begin_load_more` only fires when the distance from the end of the list
/// is below this value.
pub const LOAD_MORE_THRESHOLD: f64 = 1.0;

const FIRST_PAGE: u32 = 1;

/// A catalog page fetch handed out by the state.
///
/// Only the request currently in flight is accepted back; anything else is
/// dropped as stale. Each request gets a fresh generation, so a re-issued
/// fetch of the same page never matches an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    generation: u64,
}

impl PageRequest {
    pub const fn page(self) -> u32 {
        self.page
    }

    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Something that happened to the list
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// Environment list resolved (already including the "all" entry)
    EnvironmentsLoaded(Vec<Environment>),
    /// Environment list could not be fetched
    EnvironmentsFailed(String),
    /// User picked an environment
    FilterSelected(EnvironmentFilter),
    /// A requested page resolved
    PageLoaded {
        request: PageRequest,
        plants: Vec<Plant>,
    },
    /// A requested page failed
    PageFailed {
        request: PageRequest,
        message: String,
    },
    /// An entry was deleted from the backing store
    EntryRemoved(PlantId),
    /// The view went away; later completions are ignored
    Closed,
}

/// In-memory list of fetched plants and the filtered view of it.
///
/// `displayed` is always `filter.apply(plants)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantListState {
    plants: Vec<Plant>,
    displayed: Vec<Plant>,
    environments: Vec<Environment>,
    filter: EnvironmentFilter,
    last_page: Option<u32>,
    loading: bool,
    in_flight: Option<PageRequest>,
    generation: u64,
    exhausted: bool,
    last_error: Option<String>,
    closed: bool,
}

impl Default for PlantListState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantListState {
    /// Empty catalog list waiting for its first page
    #[must_use]
    pub const fn new() -> Self {
        Self {
            plants: Vec::new(),
            displayed: Vec::new(),
            environments: Vec::new(),
            filter: EnvironmentFilter::All,
            last_page: None,
            loading: true,
            in_flight: None,
            generation: 0,
            exhausted: false,
            last_error: None,
            closed: false,
        }
    }

    /// A fully loaded list that is not backed by catalog pages
    #[must_use]
    pub fn from_plants(plants: Vec<Plant>) -> Self {
        Self {
            displayed: plants.clone(),
            plants,
            loading: false,
            exhausted: true,
            ..Self::new()
        }
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn displayed(&self) -> &[Plant] {
        &self.displayed
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub const fn filter(&self) -> &EnvironmentFilter {
        &self.filter
    }

    /// Highest catalog page applied so far (1 before anything loads)
    pub const fn page(&self) -> u32 {
        match self.last_page {
            Some(page) => page,
            None => FIRST_PAGE,
        }
    }

    /// True until the first page resolves
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while a follow-up page is in flight
    pub const fn is_loading_more(&self) -> bool {
        self.in_flight.is_some() && !self.loading
    }

    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Recoverable error from the last failed fetch
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn find(&self, id: &PlantId) -> Option<&Plant> {
        self.plants.iter().find(|plant| &plant.id == id)
    }

    /// Request the first catalog page.
    ///
    /// Returns `None` when the view is closed or a fetch is already in flight.
    pub fn begin_initial_load(&mut self) -> Option<PageRequest> {
        if self.closed || self.in_flight.is_some() {
            return None;
        }
        let request = self.issue(FIRST_PAGE);
        self.loading = true;
        self.in_flight = Some(request);
        Some(request)
    }

    /// Request the next catalog page when the list end is near.
    ///
    /// A no-op unless `distance_from_end < LOAD_MORE_THRESHOLD`. A second
    /// trigger while a fetch is outstanding is dropped, not queued. While
    /// page 1 has never been applied the request is for page 1 again.
    pub fn begin_load_more(&mut self, distance_from_end: f64) -> Option<PageRequest> {
        if distance_from_end.is_nan() || distance_from_end >= LOAD_MORE_THRESHOLD {
            return None;
        }
        if self.closed || self.loading || self.exhausted {
            return None;
        }
        if let Some(pending) = self.in_flight {
            tracing::warn!(
                page = pending.page,
                "dropping load-more trigger while a page is in flight"
            );
            return None;
        }

        let Some(last_page) = self.last_page else {
            tracing::debug!("first page never applied, requesting it again");
            return self.begin_initial_load();
        };
        let request = self.issue(last_page + 1);
        self.in_flight = Some(request);
        Some(request)
    }

    /// Feed the outcome of a page fetch back into the state
    pub fn complete(&mut self, request: PageRequest, outcome: &crate::Result<Vec<Plant>>) {
        let event = match outcome {
            Ok(plants) => ListEvent::PageLoaded {
                request,
                plants: plants.clone(),
            },
            Err(error) => ListEvent::PageFailed {
                request,
                message: error.to_string(),
            },
        };
        self.apply(event);
    }

    /// Consume the state and return it with `event` applied
    #[must_use]
    pub fn reduce(mut self, event: ListEvent) -> Self {
        self.apply(event);
        self
    }

    /// Apply `event` in place
    pub fn apply(&mut self, event: ListEvent) {
        match event {
            ListEvent::EnvironmentsLoaded(environments) => {
                self.environments = environments;
            }
            ListEvent::EnvironmentsFailed(message) => {
                tracing::warn!(%message, "environment fetch failed");
                self.last_error = Some(message);
            }
            ListEvent::FilterSelected(filter) => {
                tracing::debug!(filter = filter.key(), "filter selected");
                self.displayed = filter.apply(&self.plants);
                self.filter = filter;
            }
            ListEvent::PageLoaded { request, plants } => {
                if !self.accepts(request) {
                    return;
                }
                self.apply_page(request, plants);
            }
            ListEvent::PageFailed { request, message } => {
                if !self.accepts(request) {
                    return;
                }
                tracing::warn!(page = request.page, %message, "catalog page failed");
                self.in_flight = None;
                self.loading = false;
                self.last_error = Some(message);
            }
            ListEvent::EntryRemoved(id) => {
                remove_first(&mut self.plants, &id);
                remove_first(&mut self.displayed, &id);
            }
            ListEvent::Closed => {
                self.closed = true;
                self.in_flight = None;
            }
        }
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.generation += 1;
        PageRequest {
            page,
            generation: self.generation,
        }
    }

    fn accepts(&self, request: PageRequest) -> bool {
        if self.closed {
            tracing::debug!(page = request.page, "ignoring page for closed list");
            return false;
        }
        if self.in_flight != Some(request) {
            tracing::debug!(page = request.page, "ignoring stale page");
            return false;
        }
        true
    }

    fn apply_page(&mut self, request: PageRequest, plants: Vec<Plant>) {
        self.in_flight = None;
        self.loading = false;
        self.last_error = None;

        if plants.is_empty() {
            tracing::debug!(page = request.page, "catalog exhausted");
            self.exhausted = true;
            if request.page == FIRST_PAGE {
                self.plants.clear();
                self.displayed.clear();
            }
            return;
        }

        let matching = self.filter.apply(&plants);
        if request.page == FIRST_PAGE {
            self.plants = plants;
            self.displayed = matching;
            self.exhausted = false;
        } else {
            self.plants.extend(plants);
            self.displayed.extend(matching);
        }
        self.last_page = Some(request.page);
        tracing::debug!(
            page = request.page,
            total = self.plants.len(),
            shown = self.displayed.len(),
            "applied catalog page"
        );
    }
}

fn remove_first(plants: &mut Vec<Plant>, id: &PlantId) {
    if let Some(index) = plants.iter().position(|plant| &plant.id == id) {
        plants.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plant(id: u64, environments: &[&str]) -> Plant {
        Plant::new(PlantId::from(id), format!("Plant {id:02}"))
            .with_environments(environments.iter().copied())
    }

    fn ids(plants: &[Plant]) -> Vec<String> {
        plants.iter().map(|plant| plant.id.to_string()).collect()
    }

    /// Ten plants, four of them tagged indoor (ids 2, 3, 7, 9)
    fn ten_plants() -> Vec<Plant> {
        (1..=10)
            .map(|id| {
                if [2, 3, 7, 9].contains(&id) {
                    plant(id, &["indoor", "living_room"])
                } else {
                    plant(id, &["outdoor"])
                }
            })
            .collect()
    }

    fn loaded(plants: Vec<Plant>) -> PlantListState {
        let mut state = PlantListState::new();
        let request = state.begin_initial_load().unwrap();
        state.apply(ListEvent::PageLoaded { request, plants });
        state
    }

    #[test]
    fn new_state_is_loading_page_one() {
        let state = PlantListState::new();
        assert!(state.is_loading());
        assert_eq!(state.page(), 1);
        assert!(state.displayed().is_empty());
    }

    #[test]
    fn initial_page_populates_both_sequences() {
        let state = loaded(ten_plants());
        assert!(!state.is_loading());
        assert_eq!(state.plants().len(), 10);
        assert_eq!(state.displayed(), state.plants());
    }

    #[test]
    fn filter_selects_tagged_plants_in_order() {
        let state = loaded(ten_plants()).reduce(ListEvent::FilterSelected(
            EnvironmentFilter::from_key("indoor"),
        ));

        assert_eq!(ids(state.displayed()), vec!["2", "3", "7", "9"]);
        assert_eq!(state.plants().len(), 10);
    }

    #[test]
    fn filter_all_restores_full_list() {
        let state = loaded(ten_plants())
            .reduce(ListEvent::FilterSelected(EnvironmentFilter::from_key("indoor")))
            .reduce(ListEvent::FilterSelected(EnvironmentFilter::from_key("outdoor")))
            .reduce(ListEvent::FilterSelected(EnvironmentFilter::from_key("all")));

        assert_eq!(state.displayed(), state.plants());
    }

    #[test]
    fn filter_matches_subsequence_for_every_tag() {
        let state = loaded(ten_plants());
        for tag in ["indoor", "outdoor", "living_room", "kitchen"] {
            let filtered = state
                .clone()
                .reduce(ListEvent::FilterSelected(EnvironmentFilter::from_key(tag)));
            let expected = state
                .plants()
                .iter()
                .filter(|plant| plant.has_environment(tag))
                .cloned()
                .collect::<Vec<_>>();
            assert_eq!(filtered.displayed(), expected.as_slice(), "tag {tag}");
        }
    }

    #[test]
    fn load_more_ignores_distant_triggers() {
        let mut state = loaded(ten_plants());
        for distance in [1.0, 1.5, 40.0, f64::INFINITY, f64::NAN] {
            assert_eq!(state.begin_load_more(distance), None);
        }
        assert_eq!(state.page(), 1);
        assert!(!state.is_loading_more());
    }

    #[test]
    fn load_more_requests_next_page_once() {
        let mut state = loaded(ten_plants());

        let request = state.begin_load_more(0.0).unwrap();
        assert_eq!(request.page(), 2);
        assert!(state.is_loading_more());

        // Re-entrant triggers while the fetch is outstanding are dropped
        assert_eq!(state.begin_load_more(0.0), None);
        assert_eq!(state.begin_load_more(0.5), None);

        state.apply(ListEvent::PageLoaded {
            request,
            plants: vec![plant(11, &["indoor"])],
        });
        assert_eq!(state.page(), 2);
        assert!(!state.is_loading_more());
        assert_eq!(state.begin_load_more(0.0).unwrap().page(), 3);
    }

    #[test]
    fn load_more_waits_for_initial_page() {
        let mut state = PlantListState::new();
        assert_eq!(state.begin_load_more(0.0), None);
    }

    #[test]
    fn sequential_pages_append_without_loss() {
        let mut state = loaded((1..=8).map(|id| plant(id, &["indoor"])).collect());

        let request = state.begin_load_more(0.0).unwrap();
        state.apply(ListEvent::PageLoaded {
            request,
            plants: (9..=12).map(|id| plant(id, &["indoor"])).collect(),
        });

        let expected = (1..=12).map(|id| id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(state.plants()), expected);
        assert_eq!(ids(state.displayed()), expected);
    }

    #[test]
    fn appended_page_respects_active_filter() {
        let mut state = loaded(ten_plants())
            .reduce(ListEvent::FilterSelected(EnvironmentFilter::from_key("indoor")));

        let request = state.begin_load_more(0.0).unwrap();
        state.apply(ListEvent::PageLoaded {
            request,
            plants: vec![plant(11, &["outdoor"]), plant(12, &["indoor"])],
        });

        assert_eq!(state.plants().len(), 12);
        assert_eq!(ids(state.displayed()), vec!["2", "3", "7", "9", "12"]);
    }

    #[test]
    fn empty_page_exhausts_catalog() {
        let mut state = loaded(ten_plants());

        let request = state.begin_load_more(0.0).unwrap();
        state.apply(ListEvent::PageLoaded {
            request,
            plants: Vec::new(),
        });

        assert!(state.is_exhausted());
        assert_eq!(state.page(), 1);
        assert_eq!(state.plants().len(), 10);
        assert_eq!(state.begin_load_more(0.0), None);
    }

    #[test]
    fn failed_page_keeps_list_and_records_error() {
        let mut state = loaded(ten_plants());
        let before = state.plants().to_vec();

        let request = state.begin_load_more(0.0).unwrap();
        state.apply(ListEvent::PageFailed {
            request,
            message: "connection reset".to_string(),
        });

        assert_eq!(state.plants(), before.as_slice());
        assert_eq!(state.page(), 1);
        assert_eq!(state.last_error(), Some("connection reset"));
        assert!(!state.is_loading_more());

        // Retry is allowed and clears the error once it succeeds
        let retry = state.begin_load_more(0.0).unwrap();
        assert_eq!(retry.page(), 2);
        state.apply(ListEvent::PageLoaded {
            request: retry,
            plants: vec![plant(11, &[])],
        });
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn page_after_close_is_ignored() {
        let mut state = loaded(ten_plants());
        let request = state.begin_load_more(0.0).unwrap();

        state.apply(ListEvent::Closed);
        let snapshot = state.clone();
        state.apply(ListEvent::PageLoaded {
            request,
            plants: vec![plant(11, &[])],
        });

        assert_eq!(state, snapshot);
        assert_eq!(state.begin_load_more(0.0), None);
    }

    #[test]
    fn stale_page_is_ignored() {
        let mut state = loaded(ten_plants());
        let snapshot = state.clone();

        state.apply(ListEvent::PageLoaded {
            request: PageRequest {
                page: 5,
                generation: 99,
            },
            plants: vec![plant(50, &[])],
        });
        assert_eq!(state, snapshot);
    }

    #[test]
    fn load_more_after_failed_first_page_retries_page_one() {
        let mut state = PlantListState::new();
        let first = state.begin_initial_load().unwrap();
        state.complete(first, &Err(crate::Error::Network("offline".to_string())));
        assert!(!state.is_loading());
        assert_eq!(state.last_error(), Some("Network error: offline"));

        let retry = state.begin_load_more(0.0).unwrap();
        assert_eq!(retry.page(), 1);
        assert!(state.is_loading());
        assert!(!state.is_loading_more());

        state.complete(retry, &Ok(ten_plants()));
        assert_eq!(state.plants().len(), 10);
        assert_eq!(state.last_error(), None);

        let next = state.begin_load_more(0.0).unwrap();
        assert_eq!(next.page(), 2);
    }

    #[test]
    fn superseded_request_for_same_page_is_ignored() {
        let mut state = PlantListState::new();
        let first = state.begin_initial_load().unwrap();
        state.complete(first, &Err(crate::Error::Network("offline".to_string())));
        let retry = state.begin_initial_load().unwrap();

        assert_eq!(first.page(), retry.page());
        assert!(retry.generation() > first.generation());

        state.apply(ListEvent::PageLoaded {
            request: first,
            plants: vec![plant(1, &[])],
        });
        assert!(state.is_loading());
        assert!(state.plants().is_empty());

        state.complete(retry, &Ok(vec![plant(2, &[])]));
        assert_eq!(ids(state.plants()), vec!["2"]);
    }

    #[test]
    fn removal_drops_exactly_one_entry() {
        let state = loaded(ten_plants())
            .reduce(ListEvent::FilterSelected(EnvironmentFilter::from_key("indoor")))
            .reduce(ListEvent::EntryRemoved(PlantId::from(3)));

        assert_eq!(state.plants().len(), 9);
        assert!(state.find(&PlantId::from(3)).is_none());
        assert_eq!(ids(state.displayed()), vec!["2", "7", "9"]);
    }

    #[test]
    fn removal_of_absent_id_is_noop() {
        let state = loaded(ten_plants());
        let after = state
            .clone()
            .reduce(ListEvent::EntryRemoved(PlantId::from(404)));
        assert_eq!(after, state);
    }

    #[test]
    fn from_plants_is_settled() {
        let mut state = PlantListState::from_plants(ten_plants());
        assert!(!state.is_loading());
        assert!(state.is_exhausted());
        assert_eq!(state.begin_load_more(0.0), None);
        assert_eq!(state.displayed().len(), 10);
    }
}
