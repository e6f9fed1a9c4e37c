use crate::{
    error::ViewerError,
    gfx::{camera::camera_utils::CameraManager, picking::PickList},
    wgpu_utils::BindGroupLayoutWithDesc,
};

use super::{actor::Actor, assembly::Assembly, ActorId, AssemblyId, Prop};

/// Main scene containing actors, assemblies and the camera
pub struct Scene {
    pub camera_manager: CameraManager,
    /// Clear color (RGB)
    pub background: [f32; 3],
    actors: Vec<Actor>,
    assemblies: Vec<Assembly>,
    props: Vec<Prop>,
}

impl Scene {
    /// Creates an empty scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            background: [0.0, 0.0, 0.0],
            actors: Vec::new(),
            assemblies: Vec::new(),
            props: Vec::new(),
        }
    }

    /// Updates the scene (camera matrices)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds a top-level actor
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = ActorId(self.actors.len());
        self.actors.push(actor);
        self.props.push(Prop::Actor(id));
        id
    }

    /// Adds a top-level assembly. Parts are added with [`Scene::add_part`].
    pub fn add_assembly(&mut self, assembly: Assembly) -> AssemblyId {
        let id = AssemblyId(self.assemblies.len());
        self.assemblies.push(assembly);
        self.props.push(Prop::Assembly(id));
        id
    }

    /// Adds `actor` as a member of `assembly`. Returns `None` when the
    /// assembly does not exist; the actor is dropped in that case.
    pub fn add_part(&mut self, assembly: AssemblyId, mut actor: Actor) -> Option<ActorId> {
        let id = ActorId(self.actors.len());
        let Some(group) = self.assemblies.get_mut(assembly.0) else {
            log::warn!("cannot add {} to missing assembly {:?}", actor.name, assembly);
            return None;
        };
        group.add_part(id);
        actor.set_parent(assembly);
        self.actors.push(actor);
        Some(id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0)
    }

    /// Every actor, top-level ones and assembly parts, in insertion order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors
            .iter()
            .enumerate()
            .map(|(index, actor)| (ActorId(index), actor))
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn assembly(&self, id: AssemblyId) -> Option<&Assembly> {
        self.assemblies.get(id.0)
    }

    /// Parts of `id` as a pick list; empty if the assembly does not exist
    pub fn assembly_parts(&self, id: AssemblyId) -> PickList {
        self.assembly(id).map(Assembly::parts).unwrap_or_default()
    }

    /// Top-level entries in insertion order
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// Creates GPU buffers for every actor that does not have them yet
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
    ) -> Result<(), ViewerError> {
        for actor in self.actors.iter_mut().filter(|a| a.gpu_resources.is_none()) {
            actor.init_gpu_resources(device, layout)?;
        }
        Ok(())
    }

    /// Syncs changed transforms and materials to the GPU
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        for actor in &mut self.actors {
            actor.update_gpu(queue);
        }
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        SceneStatistics {
            prop_count: self.props.len(),
            actor_count: self.actors.len(),
            assembly_count: self.assemblies.len(),
            total_triangles: self
                .actors
                .iter()
                .map(|a| a.geometry.triangle_count())
                .sum(),
            total_vertices: self.actors.iter().map(|a| a.geometry.vertex_count()).sum(),
        }
    }
}

/// Scene statistics for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub prop_count: usize,
    pub actor_count: usize,
    pub assembly_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::material::Material;
    use cgmath::Vector3;

    fn cube(name: &str) -> Actor {
        Actor::cube(name, Vector3::new(0.0, 0.0, 0.0), 1.0, Material::default())
    }

    #[test]
    fn test_props_only_list_top_level_entries() {
        let mut scene = Scene::new(CameraManager::default());
        let sphere = scene.add_actor(Actor::sphere(
            "sphere",
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
            Material::default(),
        ));
        let assembly = scene.add_assembly(Assembly::new("cubes"));
        let first = scene.add_part(assembly, cube("cube-0")).expect("assembly exists");
        let second = scene.add_part(assembly, cube("cube-1")).expect("assembly exists");

        assert_eq!(scene.props(), &[Prop::Actor(sphere), Prop::Assembly(assembly)]);
        assert_eq!(scene.actor_count(), 3);
        assert_eq!(
            scene.assembly(assembly).map(|a| a.part_ids().to_vec()),
            Some(vec![first, second])
        );
        assert_eq!(scene.actor(first).and_then(|a| a.parent()), Some(assembly));
        assert_eq!(scene.actor(sphere).and_then(|a| a.parent()), None);
    }

    #[test]
    fn test_add_part_to_missing_assembly() {
        let mut scene = Scene::new(CameraManager::default());
        assert!(scene.add_part(AssemblyId(7), cube("orphan")).is_none());
        assert_eq!(scene.actor_count(), 0);
        assert!(scene.assembly_parts(AssemblyId(7)).is_empty());
    }

    #[test]
    fn test_stale_handles_resolve_to_none() {
        let scene = Scene::new(CameraManager::default());
        assert!(scene.actor(ActorId(0)).is_none());
        assert!(scene.assembly(AssemblyId(0)).is_none());
    }

    #[test]
    fn test_statistics() {
        let mut scene = Scene::new(CameraManager::default());
        let assembly = scene.add_assembly(Assembly::new("cubes"));
        scene.add_part(assembly, cube("cube-0"));

        let stats = scene.statistics();
        assert_eq!(stats.prop_count, 1);
        assert_eq!(stats.actor_count, 1);
        assert_eq!(stats.assembly_count, 1);
        assert_eq!(stats.total_triangles, 12);
        assert_eq!(stats.total_vertices, 24);
    }
}
