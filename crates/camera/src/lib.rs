//! Walking camera for the arbor room.
//!
//! # Invariants
//! - `front`, `right` and `up` are always derived from yaw/pitch, never set.
//! - After a movement step the camera height rides the bobbing curve only.
//! - Horizontal position never leaves the square `[-74, 74]` on x and z.

mod camera;
mod projection;

pub use camera::{
    BOBBING_SIZE, BOBBING_SPEED, BOUNDARY, Gait, Movement, PITCH, PITCH_LIMIT, SENSITIVITY,
    SPEED, WalkCamera, WalkCameraSnapshot, YAW,
};
pub use projection::Projection;
