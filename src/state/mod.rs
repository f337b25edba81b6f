//! Application state and the data types shared by the search, map and UI layers.
//!
//! Public re-exports keep paths stable under `crate::state::*`.

pub mod app_state;
pub mod types;

pub use app_state::AppState;
pub use types::{
    Coordinate, Focus, PlaceResult, SearchMode, SearchOutcome, SearchRequest, SearchResults,
};
