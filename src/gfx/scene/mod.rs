//! # Scene Management Module
//!
//! The scene owns every actor and assembly; everything else refers to them
//! through copyable [`ActorId`] and [`AssemblyId`] handles.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container for actors, assemblies and the camera
//! - [`Actor`] - Renderable object: unit mesh, transform, pick shape, material
//! - [`Assembly`] - Composite group whose members pick as its parts
//! - [`Vertex3D`] - GPU vertex layout (position + normal)
//!
//! ## Usage
//!
//! ```
//! use cgmath::Vector3;
//! use highlight_pick::gfx::{
//!     camera::CameraManager,
//!     material::Material,
//!     scene::{Actor, Assembly, Scene},
//! };
//!
//! let mut scene = Scene::new(CameraManager::default());
//! scene.add_actor(Actor::sphere("ball", Vector3::new(0.0, 0.0, 0.0), 1.0, Material::default()));
//!
//! let group = scene.add_assembly(Assembly::new("cubes"));
//! let cube = Actor::cube("box", Vector3::new(2.0, 0.0, 0.0), 0.5, Material::default());
//! assert!(scene.add_part(group, cube).is_some());
//! assert_eq!(scene.props().len(), 2);
//! ```

pub mod actor;
pub mod assembly;
pub mod scene;
pub mod vertex;

pub use actor::{Actor, DrawActor};
pub use assembly::Assembly;
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;

/// Handle to an actor owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub(crate) usize);

/// Handle to an assembly owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(pub(crate) usize);

/// A top-level scene entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    Actor(ActorId),
    Assembly(AssemblyId),
}
