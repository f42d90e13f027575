//! Terminal Pokédex: browse, search and favourite PokéAPI entries.
//!
//! - [`api`] - PokéAPI v2 client
//! - [`catalog`] - Session state and the derived, filtered list
//! - [`app`] - UI-facing application state
//! - [`ui`] - Terminal front end and event loop
//! - [`config`], [`keybindings`], [`theme`] - User settings

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod keybindings;
pub mod theme;
pub mod ui;
pub mod util;
