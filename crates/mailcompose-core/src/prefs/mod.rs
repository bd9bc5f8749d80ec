//! Preference schema for the inventory module.
//!
//! The schema only declares what can be set and the defaults; storing
//! user values is left to the preference backend.

mod inventory;
mod model;
mod repository;

pub use inventory::{
    DefaultView, InventoryProperty, PropertySource, SortBy, SortDirection, inventory_prefs,
};
pub use model::{Pref, PrefGroup, PrefKind, PrefSchema, PrefValue};
pub use repository::InventoryRepository;
