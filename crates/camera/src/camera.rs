use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Default yaw in degrees; looks down -Z.
pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
/// Walking speed in world units per second.
pub const SPEED: f32 = 5.0;
/// Degrees of rotation per unit of pointer delta.
pub const SENSITIVITY: f32 = 0.001;
pub const BOBBING_SIZE: f32 = 0.125;
pub const BOBBING_SPEED: f32 = 5.0;
/// Pitch is held inside `[-PITCH_LIMIT, PITCH_LIMIT]` so the view never flips.
pub const PITCH_LIMIT: f32 = 89.0;
/// Half extent of the walkable square on x and z.
pub const BOUNDARY: f32 = 74.0;

const RUN_SPEED_FACTOR: f32 = 2.5;
const RUN_BOBBING_SPEED_FACTOR: f32 = 2.5;
const RUN_BOBBING_SIZE_FACTOR: f32 = 1.3;

/// Discrete movement request, abstracted away from any window system's keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

impl Movement {
    /// Processing order when several directions are held in one frame.
    pub const ALL: [Movement; 4] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
    ];
}

/// Walking or running. Running scales speed and bobbing; there is nothing in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gait {
    #[default]
    Walking,
    Running,
}

/// First-person camera that walks on a fixed height band with head bobbing.
///
/// Angles are stored in degrees. The orthonormal basis is recomputed every
/// time yaw or pitch change.
#[derive(Debug, Clone)]
pub struct WalkCamera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    constrain_pitch: bool,
    gait: Gait,
    bobbing_size: f32,
    bobbing_speed: f32,
    previous_bobbing: Vec3,
}

impl Default for WalkCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

impl WalkCamera {
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, YAW, PITCH)
    }

    pub fn with_orientation(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw,
            pitch,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            constrain_pitch: true,
            gait: Gait::Walking,
            bobbing_size: BOBBING_SIZE,
            bobbing_speed: BOBBING_SPEED,
            previous_bobbing: Vec3::ZERO,
        };
        camera.update_vectors();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn bobbing_size(&self) -> f32 {
        self.bobbing_size
    }

    pub fn bobbing_speed(&self) -> f32 {
        self.bobbing_speed
    }

    pub fn previous_bobbing(&self) -> Vec3 {
        self.previous_bobbing
    }

    pub fn gait(&self) -> Gait {
        self.gait
    }

    /// When disabled, pitch is free to pass the vertical and flip the view.
    pub fn set_constrain_pitch(&mut self, constrain: bool) {
        self.constrain_pitch = constrain;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Bobbing offset at absolute time `time` (seconds) for the current yaw.
    pub fn bobbing_at(&self, time: f32) -> Vec3 {
        let phase = time * self.bobbing_speed;
        let cos_bob = phase.cos() * self.bobbing_size;
        let sin_bob = (phase.sin() * self.bobbing_size).abs();
        let yaw = self.yaw.to_radians();
        Vec3::new(cos_bob * yaw.sin(), sin_bob, (1.0 - cos_bob) * yaw.cos())
    }

    /// Move one step in `direction`.
    ///
    /// `dt` is the frame delta and `time` the absolute elapsed time, both in
    /// seconds. Calling this for several directions in the same frame composes
    /// the steps without normalizing, so diagonals are faster.
    pub fn process_movement(&mut self, direction: Movement, dt: f32, time: f32) {
        let velocity = self.movement_speed * dt;

        let bobbing = self.bobbing_at(time);
        let delta_bobbing = self.previous_bobbing - bobbing;
        self.previous_bobbing = bobbing;

        match direction {
            Movement::Forward => self.position += self.front * velocity + delta_bobbing,
            Movement::Backward => self.position -= self.front * velocity + delta_bobbing,
            Movement::Left => self.position -= self.right * velocity + delta_bobbing,
            Movement::Right => self.position += self.right * velocity + delta_bobbing,
        }

        self.position.x = self.position.x.clamp(-BOUNDARY, BOUNDARY);
        self.position.z = self.position.z.clamp(-BOUNDARY, BOUNDARY);
        self.position.y = self.previous_bobbing.y;
    }

    /// Apply a pointer delta. `dy` is positive when the pointer moves up.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;

        if self.constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    pub fn set_gait(&mut self, gait: Gait) {
        if self.gait != gait {
            tracing::debug!(?gait, "camera gait changed");
        }
        self.gait = gait;
        match gait {
            Gait::Running => {
                self.movement_speed = SPEED * RUN_SPEED_FACTOR;
                self.bobbing_speed = BOBBING_SPEED * RUN_BOBBING_SPEED_FACTOR;
                self.bobbing_size = BOBBING_SIZE * RUN_BOBBING_SIZE_FACTOR;
            }
            Gait::Walking => {
                self.movement_speed = SPEED;
                self.bobbing_speed = BOBBING_SPEED;
                self.bobbing_size = BOBBING_SIZE;
            }
        }
    }

    pub fn snapshot(&self) -> WalkCameraSnapshot {
        WalkCameraSnapshot {
            position: self.position,
            front: self.front,
            up: self.up,
            right: self.right,
            yaw: self.yaw,
            pitch: self.pitch,
            gait: self.gait,
            movement_speed: self.movement_speed,
        }
    }

    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Read-only copy of the camera state, for inspection and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkCameraSnapshot {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub gait: Gait,
    pub movement_speed: f32,
}
