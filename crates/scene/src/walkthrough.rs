use arbor_camera::{Projection, WalkCamera};
use arbor_input::Action;
use glam::{Mat4, Vec3};

use crate::clock::FrameTime;
use crate::lighting::{DirLight, SpotLight, day_night};

pub const MATERIAL_SHININESS: f32 = 8.0;

/// Everything a renderer needs for one frame, derived from the walkthrough.
#[derive(Debug, Clone, Copy)]
pub struct FrameView {
    pub time: FrameTime,
    pub view: Mat4,
    pub projection: Mat4,
    pub view_position: Vec3,
    pub dir_light: DirLight,
    pub spot_light: SpotLight,
    pub flashlight_on: bool,
    pub shininess: f32,
    pub clear_color: [f64; 4],
}

/// Application state: the camera plus the few flags input can flip.
#[derive(Debug, Clone, Default)]
pub struct Walkthrough {
    camera: WalkCamera,
    projection: Projection,
    flashlight_on: bool,
    quit_requested: bool,
}

impl Walkthrough {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> &WalkCamera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    pub fn flashlight_on(&self) -> bool {
        self.flashlight_on
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Forward one frame of actions to the camera and flags, in order.
    pub fn apply(&mut self, time: FrameTime, actions: &[Action]) {
        for action in actions {
            match *action {
                Action::Move(direction) => {
                    self.camera
                        .process_movement(direction, time.delta, time.elapsed);
                }
                Action::Look { dx, dy } => self.camera.look(dx, dy),
                Action::SetGait(gait) => self.camera.set_gait(gait),
                Action::ToggleFlashlight => {
                    self.flashlight_on = !self.flashlight_on;
                    tracing::info!(on = self.flashlight_on, "flashlight toggled");
                }
                Action::Quit => {
                    if !self.quit_requested {
                        tracing::info!("quit requested");
                    }
                    self.quit_requested = true;
                }
                Action::ToggleHud => {}
            }
        }
    }

    /// Read camera state back and derive view, projection and lights.
    pub fn frame(&self, time: FrameTime) -> FrameView {
        FrameView {
            time,
            view: self.camera.view_matrix(),
            projection: self.projection.matrix(),
            view_position: self.camera.position(),
            dir_light: day_night(time.elapsed),
            spot_light: SpotLight::flashlight(self.camera.position(), self.camera.front()),
            flashlight_on: self.flashlight_on,
            shininess: MATERIAL_SHININESS,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_camera::{BOBBING_SIZE, Gait, Movement, SPEED};

    fn at(elapsed: f32, delta: f32) -> FrameTime {
        FrameTime { elapsed, delta }
    }

    #[test]
    fn forward_action_moves_camera() {
        let mut walk = Walkthrough::new();
        walk.apply(at(1.0, 1.0), &[Action::Move(Movement::Forward)]);
        let z = walk.camera().position().z;
        assert!((z - (3.0 - SPEED)).abs() <= BOBBING_SIZE + 1e-5);
    }

    #[test]
    fn look_action_turns_camera() {
        let mut walk = Walkthrough::new();
        walk.apply(at(0.0, 0.0), &[Action::Look { dx: 1000.0, dy: 0.0 }]);
        assert!((walk.camera().yaw() - (-89.0)).abs() < 1e-6);
    }

    #[test]
    fn gait_action_reaches_camera() {
        let mut walk = Walkthrough::new();
        walk.apply(at(0.0, 0.0), &[Action::SetGait(Gait::Running)]);
        assert_eq!(walk.camera().gait(), Gait::Running);
        assert_eq!(walk.camera().movement_speed(), SPEED * 2.5);
    }

    #[test]
    fn flashlight_toggles() {
        let mut walk = Walkthrough::new();
        assert!(!walk.flashlight_on());
        walk.apply(at(0.0, 0.0), &[Action::ToggleFlashlight]);
        assert!(walk.flashlight_on());
        assert!(walk.frame(at(0.0, 0.0)).flashlight_on);
        walk.apply(
            at(0.0, 0.0),
            &[Action::ToggleFlashlight, Action::ToggleFlashlight],
        );
        assert!(walk.flashlight_on());
    }

    #[test]
    fn quit_is_sticky() {
        let mut walk = Walkthrough::new();
        walk.apply(at(0.0, 0.0), &[Action::Quit]);
        walk.apply(at(0.1, 0.1), &[]);
        assert!(walk.quit_requested());
    }

    #[test]
    fn hud_toggle_leaves_state_alone() {
        let mut walk = Walkthrough::new();
        let before = walk.camera().snapshot();
        walk.apply(at(0.5, 0.5), &[Action::ToggleHud]);
        assert_eq!(walk.camera().snapshot(), before);
        assert!(!walk.flashlight_on());
    }

    #[test]
    fn frame_follows_camera() {
        let mut walk = Walkthrough::new();
        walk.apply(at(0.2, 0.2), &[Action::Move(Movement::Left)]);
        let frame = walk.frame(at(0.2, 0.2));
        assert_eq!(frame.view_position, walk.camera().position());
        assert_eq!(frame.spot_light.position, walk.camera().position());
        assert_eq!(frame.spot_light.direction, walk.camera().front());
        assert_eq!(frame.view, walk.camera().view_matrix());
        assert_eq!(frame.shininess, MATERIAL_SHININESS);
        assert_eq!(frame.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn frame_lighting_tracks_time() {
        let walk = Walkthrough::new();
        assert!(walk.frame(at(5.0, 0.0)).dir_light.is_day());
        assert!(!walk.frame(at(40.0, 0.0)).dir_light.is_day());
    }

    #[test]
    fn viewport_changes_projection() {
        let mut walk = Walkthrough::new();
        let before = walk.frame(at(0.0, 0.0)).projection;
        walk.set_viewport(1600, 600);
        let after = walk.frame(at(0.0, 0.0)).projection;
        assert_ne!(before, after);
        assert!((walk.projection().aspect - 1600.0 / 600.0).abs() < 1e-6);
    }
}
