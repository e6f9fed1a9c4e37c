//! # Graphics Module
//!
//! Everything between the window and the highlight logic: the orbit camera,
//! the scene graph, ray picking and the wgpu renderer.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with rotate, pan and zoom
//! - **Geometry** ([`geometry`]) - Unit sphere and cube meshes
//! - **Materials** ([`material`]) - Phong-style surface properties
//! - **Picking** ([`picking`]) - Screen ray casting against actor shapes
//! - **Rendering Pipeline** ([`rendering`]) - Phong shading plus edge overlay
//! - **Resource Management** ([`resources`]) - Depth buffer and camera bindings
//! - **Scene Management** ([`scene`]) - Actors, assemblies and handles
//!
//! ```no_run
//! use highlight_pick::gfx::{camera::CameraManager, scene::Scene};
//!
//! // The render engine is created by the app once a window exists
//! // let engine = RenderEngine::new(window, width, height).await?;
//! let scene = Scene::new(CameraManager::default());
//! ```

pub mod camera;
pub mod geometry;
pub mod material;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
