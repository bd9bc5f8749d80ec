//! Contact store backing address expansion and autocomplete.

mod model;
mod repository;

pub use model::Contact;
pub use repository::{ContactRepository, DEFAULT_SEARCH_LIMIT, MIN_SEARCH_LIMIT};
