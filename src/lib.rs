// src/lib.rs
//! Highlight Pick
//!
//! An interactive 3D viewer built on wgpu and winit: click an object to pick
//! the frontmost actor under the cursor and highlight it, click elsewhere to
//! restore its original material.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod interaction;
pub mod scene_builder;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::HighlightApp;
pub use config::{PickMode, ViewerConfig};
pub use error::ViewerError;
