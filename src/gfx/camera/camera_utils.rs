use cgmath::{Matrix4, SquareMatrix, Vector3, Zero};
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

/// Orbit camera plus the controller that drives it
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl Default for CameraManager {
    /// Frames the whole [-6, 6]^3 demo volume in a 640x480 window
    fn default() -> Self {
        let camera = OrbitCamera::new(26.0, 0.4, 0.2, Vector3::zero(), 640.0 / 480.0);
        Self::new(camera, CameraController::new(0.005, 0.1))
    }
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Returns true if the camera moved
    pub fn process_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    /// Returns true if the camera moved
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> bool {
        self.controller
            .process_keyed_events(event, &mut self.camera)
    }

    pub fn on_primary_press(&mut self) {
        self.controller.on_primary_press();
    }

    pub fn on_primary_release(&mut self) {
        self.controller.on_primary_release();
    }

    /// Get the view projection matrix from the camera
    pub fn view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }

    /// Uniform content for the current frame
    pub fn uniform(&self) -> CameraUniform {
        self.camera.uniform
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn test_default_framing_sees_demo_volume() {
        let mut manager = CameraManager::default();
        manager.camera.update_view_proj();
        let view_proj = manager.view_proj_matrix();

        for x in [-6.0, 6.0] {
            for y in [-6.0, 6.0] {
                for z in [-6.0, 6.0] {
                    let clip = view_proj * Vector4::new(x, y, z, 1.0);
                    assert!(clip.w > 0.0);
                    let (nx, ny, nz) = (clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
                    assert!(nx.abs() <= 1.0 && ny.abs() <= 1.0, "corner ({x}, {y}, {z})");
                    assert!((0.0..=1.0).contains(&nz));
                }
            }
        }
        assert_eq!(manager.uniform().view_position[3], 1.0);
    }
}
