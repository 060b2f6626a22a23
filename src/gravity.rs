//! Tilt angles and the gravity vector derived from them.

/// Per-tick gravity magnitude, tuned for a ~50 ms frame on a 6-row matrix.
pub const GRAVITY: f32 = 0.5;

/// How much pitch leaks into the sideways component.
const PITCH_INFLUENCE: f32 = 0.5;

/// Most recent orientation estimate, in degrees (roughly ±90 each).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tilt {
    /// Rotation around the long axis; positive tips the right edge down.
    pub roll: f32,
    /// Rotation around the short axis.
    pub pitch: f32,
}

impl Tilt {
    pub const LEVEL: Self = Self::new(0.0, 0.0);

    pub const fn new(roll: f32, pitch: f32) -> Self {
        Self { roll, pitch }
    }

    /// Orientation from a raw accelerometer sample, as the IMU poller computes it.
    pub fn from_accel(x: f32, y: f32, z: f32) -> Self {
        Self {
            roll: libm::atan2f(x, z).to_degrees(),
            pitch: libm::atan2f(y, z).to_degrees(),
        }
    }

    /// Sum of absolute angle changes since `previous`, used for shake detection.
    pub fn delta(&self, previous: &Self) -> f32 {
        libm::fabsf(self.roll - previous.roll) + libm::fabsf(self.pitch - previous.pitch)
    }
}

/// Velocity added to every particle each tick, in cells per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gravity {
    pub x: f32,
    pub y: f32,
}

impl Gravity {
    /// Straight down the matrix at the default magnitude.
    pub const DOWN: Self = Self { x: 0.0, y: GRAVITY };

    /// Redirect `magnitude` along the tilted "down".
    ///
    /// Roll rotates the vector continuously between the floor and the side
    /// walls; pitch adds a smaller sideways pull.
    pub fn from_tilt(tilt: Tilt, magnitude: f32) -> Self {
        let roll = tilt.roll.to_radians();
        let pitch = tilt.pitch.to_radians();
        Self {
            x: libm::sinf(roll) * magnitude - libm::sinf(pitch) * magnitude * PITCH_INFLUENCE,
            y: libm::cosf(roll) * magnitude,
        }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::DOWN
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn level_points_down() {
        let g = Gravity::from_tilt(Tilt::LEVEL, GRAVITY);
        assert_abs_diff_eq!(g.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(g.y, GRAVITY, epsilon = 1e-4);
    }

    #[test]
    fn roll_turns_gravity_sideways() {
        let g = Gravity::from_tilt(Tilt::new(90.0, 0.0), GRAVITY);
        assert_abs_diff_eq!(g.x, GRAVITY, epsilon = 1e-4);
        assert_abs_diff_eq!(g.y, 0.0, epsilon = 1e-4);

        let g = Gravity::from_tilt(Tilt::new(-45.0, 0.0), GRAVITY);
        assert!(g.x < 0.0);
        assert!(g.y > 0.0);
    }

    #[test]
    fn pitch_pulls_against_roll() {
        let g = Gravity::from_tilt(Tilt::new(0.0, 30.0), 1.0);
        assert_abs_diff_eq!(g.x, -0.25, epsilon = 1e-4);
    }

    #[test]
    fn accel_sample_gives_tilt() {
        let flat = Tilt::from_accel(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(flat.roll, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(flat.pitch, 0.0, epsilon = 1e-4);

        let rolled = Tilt::from_accel(1.0, 0.0, 1.0);
        assert_abs_diff_eq!(rolled.roll, 45.0, epsilon = 1e-3);
        assert_abs_diff_eq!(rolled.pitch, 0.0, epsilon = 1e-4);

        let upside_down = Tilt::from_accel(0.0, 0.0, -1.0);
        assert_abs_diff_eq!(upside_down.roll, 180.0, epsilon = 1e-3);
    }

    #[test]
    fn shake_delta_sums_both_axes() {
        let a = Tilt::new(10.0, -5.0);
        let b = Tilt::new(-10.0, 5.0);
        assert_abs_diff_eq!(a.delta(&b), 30.0, epsilon = 1e-6);
    }
}
