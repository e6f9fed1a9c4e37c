//! Random demo scene
//!
//! Spheres are added first as top-level actors, then one assembly holding the
//! same number of cubes. Every random draw goes through the injected RNG, so a
//! seeded generator always rebuilds the same scene.

use std::ops::RangeInclusive;

use cgmath::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::gfx::{
    material::{colors, Material},
    scene::{Actor, ActorId, Assembly, AssemblyId, Scene},
};

/// Range of each center coordinate
pub const CENTER_RANGE: RangeInclusive<f32> = -5.0..=5.0;
/// Range of sphere radii and cube edge lengths
pub const SIZE_RANGE: RangeInclusive<f32> = 0.5..=1.0;
/// Range of each color channel
pub const COLOR_RANGE: RangeInclusive<f32> = 0.4..=1.0;

/// Handles to what [`SceneBuilder::populate`] added
#[derive(Debug, Clone, PartialEq)]
pub struct DemoScene {
    pub spheres: Vec<ActorId>,
    pub assembly: AssemblyId,
}

pub struct SceneBuilder<R> {
    rng: R,
}

impl SceneBuilder<StdRng> {
    /// Seeded generator, or OS entropy when no seed is given
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> SceneBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Adds `count` spheres and an assembly of `count` cubes to `scene`
    pub fn populate(&mut self, scene: &mut Scene, count: usize) -> DemoScene {
        let spheres = (0..count)
            .map(|i| {
                let center = self.random_center();
                let radius = self.rng.random_range(SIZE_RANGE);
                let material = self.random_material();
                scene.add_actor(Actor::sphere(format!("sphere-{i}"), center, radius, material))
            })
            .collect();

        let assembly = scene.add_assembly(Assembly::new("cubes"));
        for i in 0..count {
            let center = self.random_center();
            let length = self.rng.random_range(SIZE_RANGE);
            let material = self.random_material();
            scene.add_part(
                assembly,
                Actor::cube(format!("cube-{i}"), center, length, material),
            );
        }

        log::debug!("generated {count} spheres and an assembly of {count} cubes");
        DemoScene { spheres, assembly }
    }

    fn random_center(&mut self) -> Vector3<f32> {
        Vector3::new(
            self.rng.random_range(CENTER_RANGE),
            self.rng.random_range(CENTER_RANGE),
            self.rng.random_range(CENTER_RANGE),
        )
    }

    /// Random color with the shared shading policy
    fn random_material(&mut self) -> Material {
        let color = [
            self.rng.random_range(COLOR_RANGE),
            self.rng.random_range(COLOR_RANGE),
            self.rng.random_range(COLOR_RANGE),
        ];
        Material::new(color)
            .with_diffuse(0.8)
            .with_specular(0.5, colors::WHITE, 30.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::CameraManager,
        picking::{PickService, PropPicker, Shape, Viewport},
        scene::Prop,
    };

    fn build(seed: u64, count: usize) -> (Scene, DemoScene) {
        let mut scene = Scene::new(CameraManager::default());
        let demo = SceneBuilder::new(StdRng::seed_from_u64(seed)).populate(&mut scene, count);
        (scene, demo)
    }

    #[test]
    fn test_zero_count_builds_empty_assembly() {
        let (scene, demo) = build(1, 0);

        assert!(demo.spheres.is_empty());
        assert_eq!(scene.actor_count(), 0);
        assert_eq!(scene.props(), &[Prop::Assembly(demo.assembly)]);
        assert!(scene.assembly(demo.assembly).is_some_and(|a| a.is_empty()));
    }

    #[test]
    fn test_zero_count_every_pick_misses() {
        let (scene, _) = build(1, 0);
        let mut picker = PropPicker::new();
        let viewport = Viewport::new(640.0, 480.0);

        for x in (0..640).step_by(40) {
            for y in (0..480).step_by(40) {
                assert!(picker.pick((x as f32, y as f32), viewport, &scene, None).is_none());
            }
        }
    }

    #[test]
    fn test_counts_and_names() {
        let (scene, demo) = build(7, 3);

        assert_eq!(demo.spheres.len(), 3);
        assert_eq!(scene.actor_count(), 6);
        assert_eq!(scene.props().len(), 4);

        let names: Vec<_> = scene.actors().map(|(_, a)| a.name.clone()).collect();
        assert_eq!(
            names,
            ["sphere-0", "sphere-1", "sphere-2", "cube-0", "cube-1", "cube-2"]
        );

        let parts = scene.assembly_parts(demo.assembly);
        assert_eq!(parts.len(), 3);
        for id in demo.spheres {
            assert!(!parts.contains(id));
        }
    }

    #[test]
    fn test_values_stay_in_range() {
        let (scene, _) = build(42, 25);

        for (_, actor) in scene.actors() {
            let material = actor.material;
            assert!(material.color.iter().all(|c| COLOR_RANGE.contains(c)));
            assert_eq!(material.diffuse, 0.8);
            assert_eq!(material.specular, 0.5);
            assert_eq!(material.specular_color, colors::WHITE);
            assert_eq!(material.specular_power, 30.0);
            assert!(!material.edge_visibility);

            let center = actor.center();
            for c in [center.x, center.y, center.z] {
                assert!((-5.0..=5.0).contains(&c));
            }

            match *actor.shape() {
                Shape::Sphere { radius, .. } => assert!(SIZE_RANGE.contains(&radius)),
                Shape::Box(aabb) => {
                    let length = aabb.max.x - aabb.min.x;
                    assert!(length >= 0.5 - 1e-5 && length <= 1.0 + 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let (first, _) = build(99, 5);
        let (second, _) = build(99, 5);
        let (other, _) = build(100, 5);

        let snapshot = |scene: &Scene| -> Vec<_> {
            scene
                .actors()
                .map(|(_, a)| (*a.shape(), a.material))
                .collect()
        };
        assert_eq!(snapshot(&first), snapshot(&second));
        assert_ne!(snapshot(&first), snapshot(&other));
    }
}
