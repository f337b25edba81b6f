//! Core non-UI logic: rendering outcomes and the search interaction state machine.

pub mod controller;
pub mod render;

// Re-export public APIs under `crate::logic::...`
pub use controller::{InteractionController, Session, USER_LOCATION_POPUP};
pub use render::{ListEntry, RenderSummary, ResultList, focus_entry, render};
