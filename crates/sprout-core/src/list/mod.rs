//! Plant list state and the controller that drives it.
//!
//! `PlantListState` is a plain state machine: every transition is an
//! `ListEvent` applied to the current state, so filtering, paging and removal
//! can be exercised without any UI. `PlantListController` wires the state to
//! a `CatalogSource` and a `PlantStore`.

mod controller;
mod state;

pub use controller::PlantListController;
pub use state::{ListEvent, PageRequest, PlantListState, LOAD_MORE_THRESHOLD};

pub(crate) use controller::remove_owned;
