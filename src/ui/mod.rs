//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme definitions and colors
//! - Card grid geometry and pet cards
//! - Reusable widgets
//! - Main render entry point

pub mod card;
pub mod grid;
pub mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
