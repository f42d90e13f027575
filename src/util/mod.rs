//! Unicode-aware text helpers for terminal rendering.

mod text;

pub use text::{capitalize, center_in, display_width, strip_control_chars, truncate_to_width};
