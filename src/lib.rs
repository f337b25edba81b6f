//! Library entry for nearby exposing the search, map and UI layers for the binary and tests.

pub mod app;
pub mod args;
pub mod events;
pub mod logic;
pub mod map;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
