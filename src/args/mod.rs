//! Command-line argument parsing and the non-interactive search mode.

pub mod definition;
pub mod search;

pub use definition::Args;
pub use search::print_search;
