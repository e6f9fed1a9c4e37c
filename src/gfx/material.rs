//! Surface appearance of an actor
//!
//! A [`Material`] is a plain value: copying it takes a full snapshot of every
//! attribute, which is what the highlight controller relies on to restore an
//! actor exactly.

/// Named colors used throughout the viewer
pub mod colors {
    pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
    pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
    pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
}

/// Phong-style material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB, 0.0-1.0)
    pub color: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub specular_color: [f32; 3],
    pub specular_power: f32,
    pub opacity: f32,
    /// Draw mesh edges on top of the shaded surface
    pub edge_visibility: bool,
    pub edge_color: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: colors::WHITE,
            ambient: 0.0,
            diffuse: 1.0,
            specular: 0.0,
            specular_color: colors::WHITE,
            specular_power: 1.0,
            opacity: 1.0,
            edge_visibility: false,
            edge_color: colors::BLACK,
        }
    }
}

impl Material {
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    pub fn set_diffuse(&mut self, diffuse: f32) {
        self.diffuse = diffuse.clamp(0.0, 1.0);
    }

    pub fn set_specular(&mut self, specular: f32) {
        self.specular = specular.clamp(0.0, 1.0);
    }

    pub fn set_specular_color(&mut self, color: [f32; 3]) {
        self.specular_color = color;
    }

    pub fn set_specular_power(&mut self, power: f32) {
        self.specular_power = power.max(0.0);
    }

    pub fn set_edge_visibility(&mut self, visible: bool) {
        self.edge_visibility = visible;
    }

    /// Builder pattern: Set diffuse coefficient
    pub fn with_diffuse(mut self, diffuse: f32) -> Self {
        self.set_diffuse(diffuse);
        self
    }

    /// Builder pattern: Set specular coefficient, color and power together
    pub fn with_specular(mut self, specular: f32, color: [f32; 3], power: f32) -> Self {
        self.set_specular(specular);
        self.set_specular_color(color);
        self.set_specular_power(power);
        self
    }

    /// Packs the material for the actor uniform (see `phong.wgsl`)
    pub(crate) fn shader_params(&self) -> MaterialParams {
        MaterialParams {
            color: [self.color[0], self.color[1], self.color[2], self.opacity],
            specular_color: [
                self.specular_color[0],
                self.specular_color[1],
                self.specular_color[2],
                self.specular_power,
            ],
            coefficients: [self.ambient, self.diffuse, self.specular, 0.0],
            edge_color: [self.edge_color[0], self.edge_color[1], self.edge_color[2], 1.0],
        }
    }
}

/// Material as laid out on the GPU; every field is a vec4 so no padding
/// rules apply.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialParams {
    /// rgb + opacity
    pub color: [f32; 4],
    /// rgb + specular power
    pub specular_color: [f32; 4],
    /// ambient, diffuse, specular, unused
    pub coefficients: [f32; 4],
    pub edge_color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let material = Material::default();
        assert_eq!(material.color, colors::WHITE);
        assert_eq!(material.diffuse, 1.0);
        assert_eq!(material.specular, 0.0);
        assert!(!material.edge_visibility);
    }

    #[test]
    fn test_coefficients_are_clamped() {
        let mut material = Material::default();
        material.set_diffuse(1.5);
        material.set_specular(-0.2);
        material.set_specular_power(-3.0);
        assert_eq!(material.diffuse, 1.0);
        assert_eq!(material.specular, 0.0);
        assert_eq!(material.specular_power, 0.0);
    }

    #[test]
    fn test_copy_is_a_full_snapshot() {
        let mut material = Material::new([0.5, 0.6, 0.7]).with_specular(0.5, colors::WHITE, 30.0);
        let snapshot = material;

        material.set_color(colors::RED);
        material.set_edge_visibility(true);

        assert_ne!(material, snapshot);
        assert_eq!(snapshot.color, [0.5, 0.6, 0.7]);
        assert!(!snapshot.edge_visibility);
    }

    #[test]
    fn test_shader_params_packing() {
        let material = Material::new([0.1, 0.2, 0.3])
            .with_diffuse(0.8)
            .with_specular(0.5, [1.0, 0.9, 0.8], 30.0);
        let params = material.shader_params();
        assert_eq!(params.color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(params.specular_color, [1.0, 0.9, 0.8, 30.0]);
        assert_eq!(params.coefficients, [0.0, 0.8, 0.5, 0.0]);
    }
}
