//! User interaction
//!
//! - [`highlight`] - The highlight state machine and material snapshots
//! - [`pick_highlighter`] - Press handler that picks and highlights
//! - [`style`] - Composes a press handler with orbit navigation

pub mod highlight;
pub mod pick_highlighter;
pub mod style;

pub use highlight::{highlight_material, HighlightChange, HighlightController, HighlightState};
pub use pick_highlighter::PickHighlighter;
pub use style::{InteractorStyle, PressEvent, PrimaryPressHandler};
