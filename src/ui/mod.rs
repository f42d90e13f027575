//! Terminal front end.
//!
//! - `loop_runner` - Event loop and terminal setup
//! - `input` - Key dispatch through the keybinding registry
//! - `events` - Applies fetch completions to the catalog
//! - `tasks` - Spawned API fetches
//! - `render` - Frame layout and load-state placeholders
//! - `header`, `categories`, `grid`, `card`, `status`, `help` - Widgets

mod card;
mod categories;
mod events;
mod grid;
mod header;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;
mod tasks;

pub use card::{Card, CardProps, CardStyles, CARD_HEIGHT};
pub use loop_runner::{run, Action};
