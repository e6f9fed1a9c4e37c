//! # Object Picking System
//!
//! Resolves a window coordinate to the frontmost actor under it by casting a
//! ray through the orbit camera.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Unproject the cursor through the inverse view-projection
//! 2. **Ray-Shape Intersection**: Test the ray against each eligible actor's
//!    analytic shape (sphere or box)
//! 3. **Selection**: Return the path to the closest hit
//!
//! Eligible means visible and pickable, and, when a [`PickList`] is given,
//! contained in it.
//!
//! ## Usage
//!
//! ```no_run
//! use highlight_pick::gfx::picking::{PickService, PropPicker, Viewport};
//! # fn demo(scene: &highlight_pick::gfx::scene::Scene) {
//! let mut picker = PropPicker::new();
//! if let Some(path) = picker.pick((320.0, 240.0), Viewport::new(640.0, 480.0), scene, None) {
//!     log::info!("picked {:?}", path.last_node());
//! }
//! # }
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::{
    camera::orbit_camera::OrbitCamera,
    scene::{ActorId, AssemblyId, Scene},
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Cube of the given edge length around `center`
    pub fn from_center(center: Vector3<f32>, edge_length: f32) -> Self {
        let half = Vector3::new(edge_length, edge_length, edge_length) * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;
        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }
        Self::new(min, max)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Slab test. Returns the distance to the entry point, or to the exit
    /// point when the origin is inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

/// World-space pick shape of an actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { center: Vector3<f32>, radius: f32 },
    Box(Aabb),
}

impl Shape {
    pub fn center(&self) -> Vector3<f32> {
        match self {
            Shape::Sphere { center, .. } => *center,
            Shape::Box(aabb) => aabb.center(),
        }
    }

    /// Distance along the ray to the first surface hit
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        match self {
            Shape::Sphere { center, radius } => {
                // |o + t*d - c|^2 = r^2 with |d| = 1
                let oc = ray.origin - center;
                let b = oc.dot(ray.direction);
                let c = oc.magnitude2() - radius * radius;
                let discriminant = b * b - c;
                if discriminant < 0.0 {
                    return None;
                }
                let root = discriminant.sqrt();
                let near = -b - root;
                let far = -b + root;
                if near >= 0.0 {
                    Some(near)
                } else if far >= 0.0 {
                    Some(far)
                } else {
                    None
                }
            }
            Shape::Box(aabb) => aabb.intersect_ray(ray),
        }
    }
}

/// Size of the render target in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// One step of an [`AssemblyPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathNode {
    Assembly(AssemblyId),
    Actor(ActorId),
}

/// Result of a pick: the chain from the top-level prop down to the hit actor
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyPath {
    nodes: Vec<PathNode>,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World-space hit point
    pub point: Vector3<f32>,
}

impl AssemblyPath {
    pub fn new(nodes: Vec<PathNode>, distance: f32, point: Vector3<f32>) -> Self {
        Self {
            nodes,
            distance,
            point,
        }
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn first_node(&self) -> Option<PathNode> {
        self.nodes.first().copied()
    }

    pub fn last_node(&self) -> Option<PathNode> {
        self.nodes.last().copied()
    }

    /// The actor at the end of the path, if the path ends in one
    pub fn actor(&self) -> Option<ActorId> {
        match self.last_node()? {
            PathNode::Actor(id) => Some(id),
            PathNode::Assembly(_) => None,
        }
    }
}

/// Explicit set of actors that may be picked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickList(Vec<ActorId>);

impl PickList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, actor: ActorId) {
        if !self.contains(actor) {
            self.0.push(actor);
        }
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.0.contains(&actor)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ActorId> for PickList {
    fn from_iter<T: IntoIterator<Item = ActorId>>(iter: T) -> Self {
        let mut list = PickList::new();
        for actor in iter {
            list.add(actor);
        }
        list
    }
}

/// Screen-space pick query
pub trait PickService {
    /// Picks at `screen_pos` (physical pixels, origin top-left). `restrict`
    /// limits the candidates; `None` means the whole scene.
    fn pick(
        &mut self,
        screen_pos: (f32, f32),
        viewport: Viewport,
        scene: &Scene,
        restrict: Option<&PickList>,
    ) -> Option<AssemblyPath>;
}

/// Ray-casting picker against actor shapes
#[derive(Debug, Default)]
pub struct PropPicker {
    last_ray: Option<Ray>,
}

impl PropPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ray cast by the most recent pick
    pub fn last_ray(&self) -> Option<Ray> {
        self.last_ray
    }

    /// Convert screen coordinates to a world-space ray
    pub fn screen_to_ray(screen_pos: (f32, f32), viewport: Viewport, camera: &OrbitCamera) -> Ray {
        let (mouse_x, mouse_y) = screen_pos;

        // Normalized device coordinates (-1 to 1), Y flipped
        let ndc_x = (2.0 * mouse_x) / viewport.width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / viewport.height;

        let view_proj = camera.projection_matrix() * camera.view_matrix();
        let inv_view_proj = view_proj.invert().unwrap_or(Matrix4::identity());

        // OpenGL clip space: near plane at -1, far plane at 1
        let near = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
        let far = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, 1.0, 1.0));

        Ray::new(near, far - near)
    }

    /// Projects a world point to window coordinates (origin top-left).
    /// Returns `None` for points behind the camera.
    pub fn world_to_screen(
        point: Vector3<f32>,
        viewport: Viewport,
        camera: &OrbitCamera,
    ) -> Option<(f32, f32)> {
        let clip = camera.projection_matrix()
            * camera.view_matrix()
            * Vector4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some((
            (ndc_x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc_y) * 0.5 * viewport.height,
        ))
    }

    /// Closest eligible actor hit by `ray`
    pub fn pick_ray(ray: &Ray, scene: &Scene, restrict: Option<&PickList>) -> Option<AssemblyPath> {
        let mut closest: Option<(ActorId, f32)> = None;

        for (id, actor) in scene.actors() {
            if !actor.visible || !actor.pickable {
                continue;
            }
            if restrict.is_some_and(|list| !list.contains(id)) {
                continue;
            }

            if let Some(distance) = actor.shape().intersect_ray(ray) {
                // Strict comparison keeps the first actor on ties
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((id, distance));
                }
            }
        }

        let (id, distance) = closest?;
        let nodes = match (restrict, scene.actor(id).and_then(|a| a.parent())) {
            (None, Some(assembly)) => vec![PathNode::Assembly(assembly), PathNode::Actor(id)],
            _ => vec![PathNode::Actor(id)],
        };
        Some(AssemblyPath::new(nodes, distance, ray.point_at(distance)))
    }
}

impl PickService for PropPicker {
    fn pick(
        &mut self,
        screen_pos: (f32, f32),
        viewport: Viewport,
        scene: &Scene,
        restrict: Option<&PickList>,
    ) -> Option<AssemblyPath> {
        if viewport.is_degenerate() {
            self.last_ray = None;
            return None;
        }

        let ray = Self::screen_to_ray(screen_pos, viewport, &scene.camera_manager.camera);
        self.last_ray = Some(ray);

        let result = Self::pick_ray(&ray, scene, restrict);
        match &result {
            Some(path) => log::trace!(
                "pick at {:?} hit {:?} at distance {:.3}",
                screen_pos,
                path.last_node(),
                path.distance
            ),
            None => log::trace!("pick at {:?} missed", screen_pos),
        }
        result
    }
}

fn unproject(inv_view_proj: &Matrix4<f32>, ndc: Vector4<f32>) -> Vector3<f32> {
    let world = inv_view_proj * ndc;
    Vector3::new(world.x / world.w, world.y / world.w, world.z / world.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, CameraManager},
        material::Material,
        scene::{Actor, Assembly},
    };

    const VIEWPORT: Viewport = Viewport {
        width: 100.0,
        height: 100.0,
    };

    /// Camera on +Z looking at the origin
    fn front_camera_scene() -> Scene {
        let camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    fn sphere(name: &str, center: Vector3<f32>, radius: f32) -> Actor {
        Actor::sphere(name, center, radius, Material::default())
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        let hit = aabb.intersect_ray(&ray).expect("ray should hit the box");
        assert!((hit - 4.0).abs() < 1e-5);

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());

        let ray_away = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(aabb.intersect_ray(&ray_away).is_none());
    }

    #[test]
    fn test_ray_sphere_intersection() {
        let shape = Shape::Sphere {
            center: Vector3::new(0.0, 0.0, 0.0),
            radius: 1.0,
        };

        let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = shape.intersect_ray(&ray).expect("ray should hit the sphere");
        assert!((hit - 4.0).abs() < 1e-5);

        // From inside, the exit point counts
        let inside = Ray::new(Vector3::zero(), Vector3::new(1.0, 0.0, 0.0));
        let exit = shape.intersect_ray(&inside).expect("inside ray should exit");
        assert!((exit - 1.0).abs() < 1e-5);

        let miss = Ray::new(Vector3::new(0.0, 2.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(shape.intersect_ray(&miss).is_none());
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let scene = front_camera_scene();
        let ray = PropPicker::screen_to_ray((50.0, 50.0), VIEWPORT, &scene.camera_manager.camera);

        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-4);
        assert!(ray.origin.x.abs() < 1e-4 && ray.origin.y.abs() < 1e-4);
    }

    #[test]
    fn test_world_to_screen_inverts_screen_to_ray() {
        let scene = front_camera_scene();
        let camera = &scene.camera_manager.camera;
        let point = Vector3::new(1.0, -0.5, 0.0);

        let (x, y) = PropPicker::world_to_screen(point, VIEWPORT, camera).expect("in front");
        // Right of and below the center
        assert!(x > 50.0 && y > 50.0);

        let ray = PropPicker::screen_to_ray((x, y), VIEWPORT, camera);
        let shape = Shape::Sphere {
            center: point,
            radius: 0.01,
        };
        assert!(shape.intersect_ray(&ray).is_some());
    }

    #[test]
    fn test_pick_returns_frontmost_actor() {
        let mut scene = front_camera_scene();
        let back = scene.add_actor(sphere("back", Vector3::new(0.0, 0.0, -2.0), 1.0));
        let front = scene.add_actor(sphere("front", Vector3::new(0.0, 0.0, 2.0), 0.5));

        let mut picker = PropPicker::new();
        let path = picker
            .pick((50.0, 50.0), VIEWPORT, &scene, None)
            .expect("center click should hit");

        assert_eq!(path.actor(), Some(front));
        assert_ne!(path.actor(), Some(back));
        assert_eq!(path.nodes(), &[PathNode::Actor(front)]);
        assert!(picker.last_ray().is_some());
    }

    #[test]
    fn test_pick_miss_on_background() {
        let mut scene = front_camera_scene();
        scene.add_actor(sphere("only", Vector3::zero(), 1.0));

        let mut picker = PropPicker::new();
        assert!(picker.pick((2.0, 2.0), VIEWPORT, &scene, None).is_none());
    }

    #[test]
    fn test_pick_skips_hidden_and_unpickable() {
        let mut scene = front_camera_scene();
        let hidden = scene.add_actor(sphere("hidden", Vector3::new(0.0, 0.0, 2.0), 0.5));
        let ghost = scene.add_actor(sphere("ghost", Vector3::new(0.0, 0.0, 1.0), 0.5));
        let solid = scene.add_actor(sphere("solid", Vector3::zero(), 0.5));

        if let Some(actor) = scene.actor_mut(hidden) {
            actor.visible = false;
        }
        if let Some(actor) = scene.actor_mut(ghost) {
            actor.pickable = false;
        }

        let path = PropPicker::new().pick((50.0, 50.0), VIEWPORT, &scene, None);
        assert_eq!(path.and_then(|p| p.actor()), Some(solid));
    }

    #[test]
    fn test_assembly_member_path_goes_through_assembly() {
        let mut scene = front_camera_scene();
        let assembly = scene.add_assembly(Assembly::new("cubes"));
        let cube = scene
            .add_part(assembly, Actor::cube("cube", Vector3::zero(), 1.0, Material::default()))
            .expect("assembly exists");

        let path = PropPicker::new()
            .pick((50.0, 50.0), VIEWPORT, &scene, None)
            .expect("cube is under the cursor");

        assert_eq!(path.first_node(), Some(PathNode::Assembly(assembly)));
        assert_eq!(path.last_node(), Some(PathNode::Actor(cube)));
        assert_eq!(path.actor(), Some(cube));
    }

    #[test]
    fn test_restricted_pick_ignores_actors_outside_list() {
        let mut scene = front_camera_scene();
        let sphere_id = scene.add_actor(sphere("sphere", Vector3::zero(), 1.0));
        let assembly = scene.add_assembly(Assembly::new("cubes"));
        let cube = scene
            .add_part(
                assembly,
                Actor::cube("cube", Vector3::new(3.0, 3.0, 0.0), 1.0, Material::default()),
            )
            .expect("assembly exists");
        let parts = scene.assembly(assembly).map(|a| a.parts()).unwrap_or_default();

        let mut picker = PropPicker::new();

        let unrestricted = picker.pick((50.0, 50.0), VIEWPORT, &scene, None);
        assert_eq!(unrestricted.and_then(|p| p.actor()), Some(sphere_id));

        // The sphere is right under the cursor but not in the list
        assert!(picker.pick((50.0, 50.0), VIEWPORT, &scene, Some(&parts)).is_none());

        let camera = &scene.camera_manager.camera;
        let cube_pos = PropPicker::world_to_screen(Vector3::new(3.0, 3.0, 0.0), VIEWPORT, camera)
            .expect("cube is in front of the camera");
        let restricted = picker
            .pick(cube_pos, VIEWPORT, &scene, Some(&parts))
            .expect("cube is in the list");
        assert_eq!(restricted.nodes(), &[PathNode::Actor(cube)]);
    }

    #[test]
    fn test_degenerate_viewport_never_hits() {
        let mut scene = front_camera_scene();
        scene.add_actor(sphere("sphere", Vector3::zero(), 1.0));

        let mut picker = PropPicker::new();
        assert!(picker
            .pick((0.0, 0.0), Viewport::new(0.0, 0.0), &scene, None)
            .is_none());
        assert!(picker.last_ray().is_none());
    }

    #[test]
    fn test_pick_list_deduplicates() {
        let mut scene = front_camera_scene();
        let a = scene.add_actor(sphere("a", Vector3::zero(), 1.0));
        let list: PickList = [a, a].into_iter().collect();
        assert_eq!(list.len(), 1);
        assert!(list.contains(a));
    }
}
