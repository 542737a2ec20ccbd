// Core catalog and booking exports
pub mod catalog;
pub mod draft;
pub mod filters;

pub use catalog::{Catalog, CatalogLoadError, LookupError};
pub use draft::{DraftError, DraftState, DraftStore};
pub use filters::{tutors_for_goal, random_sample, random_sample_with, sort_by_rating};
