//! TinySteps - tutor discovery and booking service
//!
//! Loads the goal and tutor catalogs once at startup, serves goal-filtered
//! and rating-sorted tutor listings, and walks visitors through a two-step
//! booking: pick a slot, then leave contact details.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Catalog, CatalogLoadError, DraftStore, DraftState, tutors_for_goal, random_sample};
pub use crate::models::{Goal, Tutor, TutorRecord, BookingDraft, Booking, Weekday, TimeSlot};
