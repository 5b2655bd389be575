//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`layout`]: Line layout of the header and card grid
//! - [`style`]: Theming and colors

pub mod layout;
pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{header_screen_top, render};
