//! Angle math for the unit circle.
//!
//! Everything here is pure: pointer coordinates come in already transformed
//! to the circle's local space (center at origin, radius 1, y up), and the
//! canonical angle lives in the half-open range [0, 2π). Degrees, cosine
//! and sine are derived from the radian value and never stored on their own.

pub mod format;
pub mod snap;

use std::f64::consts::{FRAC_PI_2, TAU};

use lazy_static::lazy_static;

/// An angle together with its derived values.
///
/// Replaced wholesale on every update; nothing mutates an `Angle` in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    /// Canonical radian value in [0, 2π).
    pub radians: f64,
    /// Degree equivalent in [0, 360).
    pub degrees: f64,
    pub cosine: f64,
    pub sine: f64,
}

impl Angle {
    /// Derive a full `Angle` from a radian value of any magnitude or sign.
    pub fn from_radians(radians: f64) -> Self {
        let radians = wrap_radians(radians);
        Self {
            radians,
            degrees: radians.to_degrees(),
            cosine: radians.cos(),
            sine: radians.sin(),
        }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Quadrant 1-4, counterclockwise from the positive x-axis.
    pub fn quadrant(&self) -> u8 {
        quadrant(self.radians)
    }

    /// Acute angle between the terminal ray and the nearest x-axis half.
    pub fn reference(&self) -> f64 {
        reference_angle(self.radians)
    }

    /// Arc length swept on the unit circle (numerically equal to radians).
    pub fn arc_length(&self) -> f64 {
        self.radians
    }

    /// Area of the swept sector, r²θ/2 with r = 1.
    pub fn sector_area(&self) -> f64 {
        0.5 * self.radians
    }
}

impl Default for Angle {
    fn default() -> Self {
        Self::from_radians(std::f64::consts::FRAC_PI_4)
    }
}

/// Wrap any radian value into [0, 2π).
///
/// `rem_euclid` already handles negative input; the extra comparison guards
/// against tiny negative values rounding up to exactly 2π.
pub fn wrap_radians(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Angle of a pointer position in the circle's local space, in [0, 2π).
///
/// Returns `None` for the degenerate origin, where the angle is undefined;
/// the caller keeps its previous angle so hovering the exact center never
/// produces a discontinuity.
pub fn angle_from_point(x: f64, y: f64) -> Option<f64> {
    if x == 0.0 && y == 0.0 {
        return None;
    }
    let mut angle = y.atan2(x);
    if angle < 0.0 {
        angle += TAU;
    }
    Some(angle)
}

/// Quadrant 1-4 for a radian value; exactly 0 (or 2π) maps to quadrant 1.
pub fn quadrant(radians: f64) -> u8 {
    let wrapped = wrap_radians(radians);
    ((wrapped / FRAC_PI_2) as u8 + 1).min(4)
}

/// Reference angle in [0, π/2).
pub fn reference_angle(radians: f64) -> f64 {
    wrap_radians(radians).rem_euclid(FRAC_PI_2)
}

/// A "nice" angle used for diagram labels and snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyAngle {
    pub degrees: u16,
    pub radians: f64,
    pub label: &'static str,
}

/// The 16 labeled angles shown on the diagram: the 30/45/60 family across
/// all four quadrants.
pub const KEY_ANGLES: [KeyAngle; 16] = [
    KeyAngle { degrees: 0, radians: 0.0, label: "0" },
    KeyAngle { degrees: 30, radians: std::f64::consts::PI / 6.0, label: "π/6" },
    KeyAngle { degrees: 45, radians: std::f64::consts::PI / 4.0, label: "π/4" },
    KeyAngle { degrees: 60, radians: std::f64::consts::PI / 3.0, label: "π/3" },
    KeyAngle { degrees: 90, radians: std::f64::consts::PI / 2.0, label: "π/2" },
    KeyAngle { degrees: 120, radians: 2.0 * std::f64::consts::PI / 3.0, label: "2π/3" },
    KeyAngle { degrees: 135, radians: 3.0 * std::f64::consts::PI / 4.0, label: "3π/4" },
    KeyAngle { degrees: 150, radians: 5.0 * std::f64::consts::PI / 6.0, label: "5π/6" },
    KeyAngle { degrees: 180, radians: std::f64::consts::PI, label: "π" },
    KeyAngle { degrees: 210, radians: 7.0 * std::f64::consts::PI / 6.0, label: "7π/6" },
    KeyAngle { degrees: 225, radians: 5.0 * std::f64::consts::PI / 4.0, label: "5π/4" },
    KeyAngle { degrees: 240, radians: 4.0 * std::f64::consts::PI / 3.0, label: "4π/3" },
    KeyAngle { degrees: 270, radians: 3.0 * std::f64::consts::PI / 2.0, label: "3π/2" },
    KeyAngle { degrees: 300, radians: 5.0 * std::f64::consts::PI / 3.0, label: "5π/3" },
    KeyAngle { degrees: 315, radians: 7.0 * std::f64::consts::PI / 4.0, label: "7π/4" },
    KeyAngle { degrees: 330, radians: 11.0 * std::f64::consts::PI / 6.0, label: "11π/6" },
];

lazy_static! {
    /// Snap targets: every multiple of 15° in [0°, 360°), ascending.
    ///
    /// Denser than [`KEY_ANGLES`]: the unlabeled 15° ticks snap too.
    pub static ref SNAP_GRID: Vec<f64> = (0..360)
        .step_by(15)
        .map(|deg| f64::from(deg).to_radians())
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::PI;

    #[test]
    fn derived_angle_stays_in_range() {
        for raw in [-100.0, -TAU, -0.1, 0.0, 1.0, PI, TAU, TAU + 0.5, 100.0] {
            let angle = Angle::from_radians(raw);
            assert!(angle.radians >= 0.0 && angle.radians < TAU, "raw {}", raw);
            assert!(angle.degrees >= 0.0 && angle.degrees < 360.0, "raw {}", raw);
        }
    }

    #[test]
    fn derived_angle_lies_on_the_unit_circle() {
        for i in 0..1000 {
            let raw = -20.0 + 0.04 * i as f64;
            let angle = Angle::from_radians(raw);
            assert_relative_eq!(
                angle.cosine * angle.cosine + angle.sine * angle.sine,
                1.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn wrap_handles_negative_input() {
        assert_relative_eq!(wrap_radians(-PI / 2.0), 3.0 * PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_radians(-TAU - 1.0), TAU - 1.0, epsilon = 1e-12);
        assert_eq!(wrap_radians(TAU), 0.0);
    }

    #[test]
    fn pointer_angle_covers_all_quadrants() {
        assert_relative_eq!(angle_from_point(1.0, 0.0).unwrap(), 0.0);
        assert_relative_eq!(angle_from_point(0.0, 1.0).unwrap(), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(angle_from_point(-1.0, 0.0).unwrap(), PI, epsilon = 1e-12);
        assert_relative_eq!(
            angle_from_point(0.0, -1.0).unwrap(),
            3.0 * PI / 2.0,
            epsilon = 1e-12
        );
        // Below the x-axis the atan2 result is negative and must be shifted.
        let angle = angle_from_point(0.5, -0.5).unwrap();
        assert!(angle > PI && angle < TAU);
    }

    #[test]
    fn pointer_angle_is_undefined_at_the_origin() {
        assert_eq!(angle_from_point(0.0, 0.0), None);
    }

    #[rstest]
    #[case(0.0, 1)]
    #[case(PI / 4.0, 1)]
    #[case(PI / 2.0 + 0.001, 2)]
    #[case(PI, 3)]
    #[case(3.0 * PI / 2.0 + 0.001, 4)]
    #[case(TAU, 1)]
    fn quadrant_numbering(#[case] radians: f64, #[case] expected: u8) {
        assert_eq!(quadrant(radians), expected);
    }

    #[test]
    fn reference_angle_is_acute() {
        for i in 0..630 {
            let radians = 0.01 * i as f64;
            let reference = reference_angle(radians);
            assert!(reference >= 0.0 && reference < FRAC_PI_2);
        }
        assert_relative_eq!(reference_angle(2.0 * PI / 3.0), PI / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn key_angle_labels_match_the_formatter() {
        for key in KEY_ANGLES {
            assert_eq!(format::format_radians(key.radians), key.label);
            assert_relative_eq!(
                f64::from(key.degrees).to_radians(),
                key.radians,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn snap_grid_is_ascending_and_fifteen_degree_spaced() {
        assert_eq!(SNAP_GRID.len(), 24);
        for pair in SNAP_GRID.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], PI / 12.0, epsilon = 1e-12);
        }
    }
}
