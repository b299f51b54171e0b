use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Seconds of elapsed time per radian of sun travel.
const DAY_PERIOD_SCALE: f32 = 10.0;
const SUN_AMBIENT: f32 = 0.01;
const SUN_INTENSITY: f32 = 0.5;

/// Directional light (the sun).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirLight {
    /// Zero at night; the shader skips a zero-length direction.
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl DirLight {
    pub fn is_day(&self) -> bool {
        self.direction != Vec3::ZERO
    }
}

/// Sun state at `elapsed` seconds.
///
/// The sun is up while `sin(t / 10)` is positive; its strength follows that
/// sine. At night only the ambient term remains.
pub fn day_night(elapsed: f32) -> DirLight {
    let phase = elapsed / DAY_PERIOD_SCALE;
    let (sin_t, cos_t) = phase.sin_cos();

    if sin_t > 0.0 {
        DirLight {
            direction: Vec3::new(-cos_t, -sin_t, -1.0 + cos_t),
            ambient: Vec3::splat(SUN_AMBIENT),
            diffuse: Vec3::splat(SUN_INTENSITY * sin_t),
            specular: Vec3::splat(SUN_INTENSITY * sin_t),
        }
    } else {
        DirLight {
            direction: Vec3::ZERO,
            ambient: Vec3::splat(SUN_AMBIENT),
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
        }
    }
}

/// Cone-limited positional light: the flashlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cosine of the outer cone angle.
    pub outer_cut_off: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl SpotLight {
    /// Flashlight held at the eye, pointing where the camera looks.
    pub fn flashlight(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
            cut_off: 12.5_f32.to_radians().cos(),
            outer_cut_off: 15.0_f32.to_radians().cos(),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn midday_sun_points_straight_down() {
        let t = 10.0 * PI / 2.0;
        let sun = day_night(t);
        assert!(sun.is_day());
        assert!((sun.direction - Vec3::new(0.0, -1.0, -1.0)).length() < 1e-5);
        assert!((sun.diffuse.x - 0.5).abs() < 1e-6);
        assert_eq!(sun.diffuse, sun.specular);
        assert_eq!(sun.ambient, Vec3::splat(0.01));
    }

    #[test]
    fn sun_strength_follows_sine() {
        let t = 3.0;
        let sun = day_night(t);
        let expected = 0.5 * (t / 10.0).sin();
        assert!((sun.diffuse.y - expected).abs() < 1e-6);
    }

    #[test]
    fn night_has_no_direction() {
        let t = 10.0 * (PI + 1.0);
        let night = day_night(t);
        assert!(!night.is_day());
        assert_eq!(night.diffuse, Vec3::ZERO);
        assert_eq!(night.specular, Vec3::ZERO);
        assert_eq!(night.ambient, Vec3::splat(0.01));
    }

    #[test]
    fn start_of_run_is_dusk() {
        // sin(0) is not positive
        assert!(!day_night(0.0).is_day());
        assert!(day_night(0.1).is_day());
    }

    #[test]
    fn flashlight_constants() {
        let spot = SpotLight::flashlight(Vec3::ZERO, Vec3::NEG_Z);
        assert!(spot.cut_off > spot.outer_cut_off);
        assert!((spot.cut_off - 0.976_296).abs() < 1e-5);
        assert!((spot.outer_cut_off - 0.965_926).abs() < 1e-5);
        assert_eq!(
            (spot.constant, spot.linear, spot.quadratic),
            (1.0, 0.09, 0.032)
        );
        assert_eq!(spot.position, Vec3::ZERO);
        assert_eq!(spot.direction, Vec3::NEG_Z);
    }
}
