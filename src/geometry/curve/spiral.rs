use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::Point2;

use super::ParamCurve;

/// An Archimedean spiral with constant pitch.
///
/// The parameter `t` is the cumulative rotation angle and the radius grows
/// linearly with it:
///
/// `P(t) = (k * t * cos(t), k * t * sin(t))` where `k = pitch / (2 * pi)`.
///
/// An optical disc spins counter-clockwise seen from the label side, so the
/// track read from below winds counter-clockwise outward, which is the
/// direction of increasing `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchimedeanSpiral {
    pitch: f64,
    k: f64,
}

impl ArchimedeanSpiral {
    /// Creates a spiral whose windings are `pitch` apart.
    ///
    /// # Errors
    ///
    /// Returns an error if `pitch` is not finite and positive.
    pub fn new(pitch: f64) -> Result<Self> {
        if !(pitch.is_finite() && pitch > 0.0) {
            return Err(GeometryError::Degenerate(format!(
                "spiral pitch must be finite and positive, got {pitch}"
            ))
            .into());
        }
        Ok(Self {
            pitch,
            k: pitch / TAU,
        })
    }

    /// Returns the distance between consecutive windings.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Returns the radial growth per radian, `pitch / (2 * pi)`.
    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }
}

impl ParamCurve for ArchimedeanSpiral {
    fn position(&self, t: f64) -> Point2 {
        let r = self.k * t;
        Point2::new(r * t.cos(), r * t.sin())
    }

    fn speed(&self, t: f64) -> f64 {
        self.k * t.hypot(1.0)
    }

    fn arc_length_up_to(&self, t: f64) -> f64 {
        let root = t.hypot(1.0);
        self.k * (0.5 * t * root + (root + t).abs().ln())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{MICRON_TO_MM, TRACK_TOLERANCE};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn dvd_track() -> ArchimedeanSpiral {
        ArchimedeanSpiral::new(0.74 * MICRON_TO_MM).unwrap()
    }

    #[test]
    fn rejects_bad_pitch() {
        assert!(ArchimedeanSpiral::new(0.0).is_err());
        assert!(ArchimedeanSpiral::new(-1.0).is_err());
        assert!(ArchimedeanSpiral::new(f64::NAN).is_err());
    }

    #[test]
    fn one_turn_moves_out_by_pitch() {
        let s = ArchimedeanSpiral::new(2.0).unwrap();
        let p0 = s.position(TAU);
        let p1 = s.position(2.0 * TAU);
        assert_relative_eq!(p1.x - p0.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p0.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn position_quarter_turn() {
        let s = ArchimedeanSpiral::new(TAU).unwrap();
        let p = s.position(FRAC_PI_2);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn radius_matches_norm() {
        let s = ArchimedeanSpiral::new(3.0).unwrap();
        for t in [0.0, 0.3, PI, 40.0] {
            assert_relative_eq!(s.radius(t), s.position(t).coords.norm(), epsilon = 1e-9);
        }
    }

    #[test]
    fn arc_length_derivative_is_speed() {
        let s = ArchimedeanSpiral::new(1.5).unwrap();
        let h = 1e-6;
        for t in [0.5, 3.0, 250.0] {
            let numeric = (s.arc_length_up_to(t + h) - s.arc_length_up_to(t - h)) / (2.0 * h);
            assert_relative_eq!(numeric, s.speed(t), max_relative = 1e-6);
        }
    }

    #[test]
    fn arc_length_zero_at_origin() {
        assert_abs_diff_eq!(dvd_track().arc_length_up_to(0.0), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn arc_length_is_monotonic() {
        let s = dvd_track();
        let ts = [0.0, 0.5, 10.0, 1.0e3, 1.0e5, 4.0e5];
        for pair in ts.windows(2) {
            assert!(s.arc_length_up_to(pair[0]) < s.arc_length_up_to(pair[1]));
        }
    }

    #[test]
    fn inner_radius_comes_before_outer_radius() {
        let s = dvd_track();
        let t12 = s.find_parameter_for_radius(12.0, TRACK_TOLERANCE).unwrap();
        let t29 = s.find_parameter_for_radius(29.0, TRACK_TOLERANCE).unwrap();
        assert!(s.arc_length_up_to(t12) < s.arc_length_up_to(t29));
        assert_abs_diff_eq!(s.radius(t12), 12.0, epsilon = TRACK_TOLERANCE);
    }

    #[test]
    fn arc_length_lookup_round_trip() {
        let s = dvd_track();
        let t = 123_456.0;
        let length = s.arc_length_up_to(t);
        let found = s.find_parameter_for_arc_length(length, TRACK_TOLERANCE).unwrap();
        // speed here is about 14.5 mm/rad
        assert_abs_diff_eq!(found, t, epsilon = 1e-6);
    }
}
