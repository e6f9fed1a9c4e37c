//! Interactor style: custom press logic composed with orbit navigation
//!
//! The style owns a [`PrimaryPressHandler`] and runs it on every left-button
//! press. Afterwards the press always reaches the scene's camera controller,
//! so navigation keeps working whatever the handler does.
//!
//! Raw device events keep arriving while the window is in the background, so
//! navigation ignores them until focus returns.

use winit::event::{DeviceEvent, KeyEvent};

use crate::gfx::{picking::Viewport, scene::Scene};

/// A primary-button press in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressEvent {
    /// Physical pixels, origin top-left
    pub position: (f32, f32),
    pub viewport: Viewport,
}

/// Custom behavior run on a primary press, before navigation sees it
pub trait PrimaryPressHandler {
    /// Returns true if the scene changed and needs a redraw
    fn on_primary_press(&mut self, event: &PressEvent, scene: &mut Scene) -> bool;
}

pub struct InteractorStyle<H> {
    handler: H,
    cursor: (f32, f32),
    viewport: Viewport,
    focused: bool,
}

impl<H: PrimaryPressHandler> InteractorStyle<H> {
    pub fn new(handler: H, viewport: Viewport) -> Self {
        Self {
            handler,
            cursor: (0.0, 0.0),
            viewport,
            focused: true,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width as f32, height as f32);
    }

    /// Runs the handler, then forwards the press to navigation
    pub fn on_left_button_down(&mut self, scene: &mut Scene) -> bool {
        let event = PressEvent {
            position: self.cursor,
            viewport: self.viewport,
        };
        let changed = self.handler.on_primary_press(&event, scene);
        scene.camera_manager.on_primary_press();
        changed
    }

    pub fn on_left_button_up(&mut self, scene: &mut Scene) {
        scene.camera_manager.on_primary_release();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Losing focus ends any drag, since the button release and shift key-up
    /// may go to another window
    pub fn on_focus_changed(&mut self, focused: bool, scene: &mut Scene) {
        self.focused = focused;
        if !focused {
            scene.camera_manager.on_primary_release();
            scene.camera_manager.controller.set_shift_held(false);
        }
    }

    /// Returns true if the camera moved
    pub fn on_device_event(&mut self, event: &DeviceEvent, scene: &mut Scene) -> bool {
        if !self.focused {
            return false;
        }
        scene.camera_manager.process_event(event)
    }

    /// Returns true if the camera moved
    pub fn on_key(&mut self, event: &KeyEvent, scene: &mut Scene) -> bool {
        scene.camera_manager.process_keyboard_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::CameraManager;
    use winit::event::MouseScrollDelta;

    #[derive(Default)]
    struct RecordingHandler {
        presses: Vec<PressEvent>,
        navigation_was_idle: Vec<bool>,
    }

    impl PrimaryPressHandler for RecordingHandler {
        fn on_primary_press(&mut self, event: &PressEvent, scene: &mut Scene) -> bool {
            self.presses.push(*event);
            // Navigation must not have seen the press yet
            self.navigation_was_idle
                .push(!scene.camera_manager.controller.is_rotating());
            false
        }
    }

    #[test]
    fn test_every_press_reaches_handler_then_navigation() {
        let mut scene = Scene::new(CameraManager::default());
        let mut style =
            InteractorStyle::new(RecordingHandler::default(), Viewport::new(640.0, 480.0));

        for i in 0..3 {
            style.on_cursor_moved(10.0 * i as f32, 20.0);
            assert!(!style.on_left_button_down(&mut scene));
            assert!(scene.camera_manager.controller.is_rotating());
            style.on_left_button_up(&mut scene);
            assert!(!scene.camera_manager.controller.is_rotating());
        }

        let handler = style.handler();
        assert_eq!(handler.presses.len(), 3);
        assert_eq!(handler.presses[2].position, (20.0, 20.0));
        assert!(handler.navigation_was_idle.iter().all(|idle| *idle));
    }

    #[test]
    fn test_press_carries_current_viewport() {
        let mut scene = Scene::new(CameraManager::default());
        let mut style =
            InteractorStyle::new(RecordingHandler::default(), Viewport::new(640.0, 480.0));

        style.set_viewport(800, 600);
        style.on_left_button_down(&mut scene);
        assert_eq!(style.handler().presses[0].viewport, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn test_drag_after_press_moves_camera() {
        let mut scene = Scene::new(CameraManager::default());
        let mut style =
            InteractorStyle::new(RecordingHandler::default(), Viewport::new(640.0, 480.0));
        let yaw = scene.camera_manager.camera.yaw;

        let drag = DeviceEvent::MouseMotion { delta: (15.0, 0.0) };
        assert!(!style.on_device_event(&drag, &mut scene));

        style.on_left_button_down(&mut scene);
        assert!(style.on_device_event(&drag, &mut scene));
        assert_ne!(scene.camera_manager.camera.yaw, yaw);
    }

    #[test]
    fn test_background_wheel_is_ignored() {
        let mut scene = Scene::new(CameraManager::default());
        let mut style =
            InteractorStyle::new(RecordingHandler::default(), Viewport::new(640.0, 480.0));
        let wheel = DeviceEvent::MouseWheel {
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
        };
        let distance = scene.camera_manager.camera.distance;

        style.on_focus_changed(false, &mut scene);
        assert!(!style.is_focused());
        assert!(!style.on_device_event(&wheel, &mut scene));
        assert_eq!(scene.camera_manager.camera.distance, distance);

        style.on_focus_changed(true, &mut scene);
        assert!(style.on_device_event(&wheel, &mut scene));
        assert_ne!(scene.camera_manager.camera.distance, distance);
    }

    #[test]
    fn test_losing_focus_ends_drag() {
        let mut scene = Scene::new(CameraManager::default());
        let mut style =
            InteractorStyle::new(RecordingHandler::default(), Viewport::new(640.0, 480.0));

        style.on_left_button_down(&mut scene);
        assert!(scene.camera_manager.controller.is_rotating());

        // Release happens outside the window and never arrives
        style.on_focus_changed(false, &mut scene);
        style.on_focus_changed(true, &mut scene);
        assert!(!scene.camera_manager.controller.is_rotating());

        let yaw = scene.camera_manager.camera.yaw;
        let drag = DeviceEvent::MouseMotion { delta: (15.0, 0.0) };
        assert!(!style.on_device_event(&drag, &mut scene));
        assert_eq!(scene.camera_manager.camera.yaw, yaw);
    }
}
