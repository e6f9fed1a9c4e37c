//! Renderable scene actors
//!
//! An actor pairs a unit mesh with a model transform, an analytic pick shape
//! and a [`Material`]. GPU buffers are created lazily so actors can be built
//! and inspected without a device.

use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    error::ViewerError,
    gfx::{
        geometry::{generate_cube, generate_sphere, GeometryData},
        material::{Material, MaterialParams},
        picking::{Aabb, Shape},
        scene::AssemblyId,
    },
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer},
};

/// Sphere tessellation around the vertical axis
pub const SPHERE_THETA_RESOLUTION: u32 = 21;
/// Sphere tessellation from pole to pole
pub const SPHERE_PHI_RESOLUTION: u32 = 11;

/// Per-actor uniform, bound at group 1 (see `phong.wgsl`)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ActorUniform {
    pub model: [[f32; 4]; 4],
    pub material: MaterialParams,
}

/// GPU-side buffers of an actor
pub struct ActorGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub edge_buffer: wgpu::Buffer,
    pub edge_count: u32,
    pub uniform: UniformBuffer<ActorUniform>,
    pub bind_group: wgpu::BindGroup,
}

pub struct Actor {
    pub name: String,
    pub geometry: GeometryData,
    pub material: Material,
    pub visible: bool,
    pub pickable: bool,
    transform: Matrix4<f32>,
    shape: Shape,
    parent: Option<AssemblyId>,
    pub gpu_resources: Option<ActorGpuResources>, // None until init_gpu_resources called
}

impl Actor {
    fn new(
        name: impl Into<String>,
        geometry: GeometryData,
        transform: Matrix4<f32>,
        shape: Shape,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            visible: true,
            pickable: true,
            transform,
            shape,
            parent: None,
            gpu_resources: None,
        }
    }

    /// Tessellated sphere of `radius` around `center`
    ///
    /// Picking tests the exact sphere, which passes through every mesh vertex
    /// and so encloses the drawn facets. Near the silhouette a click up to
    /// about 2% of the radius outside the drawn outline can still hit.
    pub fn sphere(
        name: impl Into<String>,
        center: Vector3<f32>,
        radius: f32,
        material: Material,
    ) -> Self {
        let transform = Matrix4::from_translation(center) * Matrix4::from_scale(radius);
        Self::new(
            name,
            generate_sphere(SPHERE_THETA_RESOLUTION, SPHERE_PHI_RESOLUTION),
            transform,
            Shape::Sphere { center, radius },
            material,
        )
    }

    /// Axis-aligned cube with the given edge length around `center`
    pub fn cube(
        name: impl Into<String>,
        center: Vector3<f32>,
        edge_length: f32,
        material: Material,
    ) -> Self {
        let transform = Matrix4::from_translation(center) * Matrix4::from_scale(edge_length);
        Self::new(
            name,
            generate_cube(),
            transform,
            Shape::Box(Aabb::from_center(center, edge_length)),
            material,
        )
    }

    pub fn transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn center(&self) -> Vector3<f32> {
        self.shape.center()
    }

    /// Assembly that owns this actor, if any
    pub fn parent(&self) -> Option<AssemblyId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: AssemblyId) {
        self.parent = Some(parent);
    }

    pub fn uniform(&self) -> ActorUniform {
        ActorUniform {
            model: self.transform.into(),
            material: self.material.shader_params(),
        }
    }

    pub fn init_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
    ) -> Result<(), ViewerError> {
        let vertices = self.geometry.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", self.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Edge Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.geometry.edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = UniformBuffer::new_with_data(device, &self.uniform());
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform.binding_resource())
            .create(device, &format!("{} Bind Group", self.name))?;

        self.gpu_resources = Some(ActorGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: self.geometry.indices.len() as u32,
            edge_buffer,
            edge_count: self.geometry.edges.len() as u32,
            uniform,
            bind_group,
        });
        Ok(())
    }

    /// Pushes the current transform and material to the GPU if they changed
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        let content = self.uniform();
        if let Some(resources) = &mut self.gpu_resources {
            if resources.uniform.update_content(queue, content) {
                log::trace!("uploaded uniform for {}", self.name);
            }
        }
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("material", &self.material)
            .field("visible", &self.visible)
            .field("pickable", &self.pickable)
            .field("parent", &self.parent)
            .field("uploaded", &self.gpu_resources.is_some())
            .finish()
    }
}

/// Draw commands for actors, bound at group 1
pub trait DrawActor {
    fn draw_actor(&mut self, actor: &Actor);
    fn draw_actor_edges(&mut self, actor: &Actor);
}

impl DrawActor for wgpu::RenderPass<'_> {
    fn draw_actor(&mut self, actor: &Actor) {
        let Some(resources) = &actor.gpu_resources else {
            return; // Skip drawing if not uploaded
        };

        self.set_bind_group(1, &resources.bind_group, &[]);
        self.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
        self.set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..resources.index_count, 0, 0..1);
    }

    fn draw_actor_edges(&mut self, actor: &Actor) {
        let Some(resources) = &actor.gpu_resources else {
            return;
        };

        self.set_bind_group(1, &resources.bind_group, &[]);
        self.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
        self.set_index_buffer(resources.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..resources.edge_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn test_uniform_layout_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<ActorUniform>(), 128);
        assert_eq!(std::mem::size_of::<ActorUniform>() % 16, 0);
    }

    #[test]
    fn test_sphere_transform_places_unit_mesh() {
        let center = Vector3::new(1.0, 2.0, 3.0);
        let actor = Actor::sphere("s", center, 0.5, Material::default());

        // The unit mesh's +X pole lands on the sphere surface
        let pole = actor.transform() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((pole.x - 1.5).abs() < 1e-6);
        assert!((pole.y - 2.0).abs() < 1e-6);
        assert_eq!(actor.center(), center);
        assert_eq!(
            *actor.shape(),
            Shape::Sphere {
                center,
                radius: 0.5
            }
        );
    }

    #[test]
    fn test_pick_sphere_encloses_tessellated_mesh() {
        let center = Vector3::new(1.0, -2.0, 0.5);
        let radius = 0.8;
        let actor = Actor::sphere("s", center, radius, Material::default());

        let world: Vec<Vector3<f32>> = actor
            .geometry
            .vertices
            .iter()
            .map(|&[x, y, z]| {
                let p = actor.transform() * Vector4::new(x, y, z, 1.0);
                Vector3::new(p.x, p.y, p.z)
            })
            .collect();

        // Vertices sit on the pick sphere
        for vertex in &world {
            assert!(((*vertex - center).magnitude() - radius).abs() < 1e-5);
        }

        // Facets dip inside it, but only slightly
        for triangle in actor.geometry.indices.chunks_exact(3) {
            let centroid = (world[triangle[0] as usize]
                + world[triangle[1] as usize]
                + world[triangle[2] as usize])
                / 3.0;
            let depth = (centroid - center).magnitude() / radius;
            assert!(depth < 1.0 + 1e-5);
            assert!(depth > 0.95);
        }
    }

    #[test]
    fn test_cube_shape_matches_mesh_bounds() {
        let actor = Actor::cube("c", Vector3::new(0.0, 1.0, 0.0), 2.0, Material::default());
        let Shape::Box(aabb) = *actor.shape() else {
            panic!("cube should have a box shape");
        };
        assert_eq!(aabb.min, Vector3::new(-1.0, 0.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 2.0, 1.0));

        let corner = actor.transform() * Vector4::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(Vector3::new(corner.x, corner.y, corner.z), aabb.max);
    }

    #[test]
    fn test_new_actor_is_visible_pickable_and_unparented() {
        let actor = Actor::sphere("s", Vector3::new(0.0, 0.0, 0.0), 1.0, Material::default());
        assert!(actor.visible);
        assert!(actor.pickable);
        assert!(actor.parent().is_none());
        assert!(actor.gpu_resources.is_none());
    }

    #[test]
    fn test_uniform_carries_material() {
        let mut actor = Actor::cube("c", Vector3::new(0.0, 0.0, 0.0), 1.0, Material::default());
        actor.material.set_color([1.0, 0.0, 0.0]);
        assert_eq!(actor.uniform().material.color, [1.0, 0.0, 0.0, 1.0]);
    }
}
