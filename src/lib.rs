//! Browse the tracks a Mood It server matches to a mood, or all liked tracks.

pub mod actions;
pub mod config;
pub mod endpoints;
pub mod models;
pub mod render;
pub mod source;
pub mod ui;
pub mod view;
