mod spiral;

pub use spiral::ArchimedeanSpiral;

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::{search, Monotonicity, Point2};

/// Trait for parametric curves in the plane.
///
/// Implementors supply position, speed and cumulative arc length; radius and
/// the inverse lookups are derived from those.
pub trait ParamCurve {
    /// Evaluates the curve at parameter `t`.
    fn position(&self, t: f64) -> Point2;

    /// Magnitude of the derivative of position with respect to `t`.
    fn speed(&self, t: f64) -> f64;

    /// Arc length from `t = 0` to `t`.
    fn arc_length_up_to(&self, t: f64) -> f64;

    /// Direction of [`ParamCurve::arc_length_up_to`] as `t` grows.
    fn arc_length_monotonicity(&self) -> Monotonicity {
        Monotonicity::Increasing
    }

    /// Direction of [`ParamCurve::radius`] as `t` grows, over the region the
    /// curve is meant to be used in.
    fn radius_monotonicity(&self) -> Monotonicity {
        Monotonicity::Increasing
    }

    /// Distance from the origin at parameter `t`.
    fn radius(&self, t: f64) -> f64 {
        self.position(t).coords.norm()
    }

    /// Finds the parameter whose arc length from `t = 0` is `length`.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    fn find_parameter_for_arc_length(&self, length: f64, epsilon: f64) -> Result<f64> {
        let t = search(
            0.0,
            |t| self.arc_length_up_to(t),
            self.arc_length_monotonicity(),
            length,
            epsilon,
        )?;
        Ok(t)
    }

    /// Finds the parameter at which the curve is `radius` away from the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails, in particular if the radius is
    /// not monotonic over the explored range.
    fn find_parameter_for_radius(&self, radius: f64, epsilon: f64) -> Result<f64> {
        let t = search(
            0.0,
            |t| self.radius(t),
            self.radius_monotonicity(),
            radius,
            epsilon,
        )?;
        Ok(t)
    }

    /// Samples points from `t0` to `t1` so that consecutive points are
    /// roughly `epsilon` apart along the curve.
    ///
    /// The first point is `position(t0)` and the last is always
    /// `position(t1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is not positive or the curve speed is
    /// zero or non-finite at a visited parameter.
    fn sample_by_tolerance(&self, t0: f64, t1: f64, epsilon: f64) -> Result<Vec<Point2>> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(GeometryError::InvalidParameters(format!(
                "sampling tolerance must be finite and positive, got {epsilon}"
            ))
            .into());
        }
        if t0 == t1 {
            return Ok(vec![self.position(t0)]);
        }

        let direction = if t0 < t1 { 1.0 } else { -1.0 };
        let before_end = |t: f64| if direction > 0.0 { t < t1 } else { t > t1 };

        let mut points = Vec::new();
        let mut t = t0;
        while before_end(t) {
            points.push(self.position(t));
            let speed = self.speed(t);
            if !(speed.is_finite() && speed > 0.0) {
                return Err(GeometryError::DegenerateSampling { t, speed }.into());
            }
            // Distance ~ speed * dt, so dt = epsilon / speed.
            let next = t + direction * (epsilon / speed);
            if next == t {
                return Err(GeometryError::InvalidParameters(format!(
                    "sampling tolerance {epsilon} is below the parameter resolution at t = {t}"
                ))
                .into());
            }
            t = next;
        }
        points.push(self.position(t1));

        debug!("sampled {} points on [{t0}, {t1}]", points.len());
        Ok(points)
    }

    /// Samples `n + 1` points at evenly spaced parameters from `t0` to `t1`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero.
    fn sample_by_count(&self, t0: f64, t1: f64, n: usize) -> Result<Vec<Point2>> {
        if n == 0 {
            return Err(GeometryError::InvalidParameters(
                "sample count must be at least 1".to_owned(),
            )
            .into());
        }

        #[allow(clippy::cast_precision_loss)]
        let delta = (t1 - t0) / n as f64;
        let mut points: Vec<Point2> = (0..n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = t0 + delta * i as f64;
                self.position(t)
            })
            .collect();
        points.push(self.position(t1));

        debug!("sampled {} points on [{t0}, {t1}]", points.len());
        Ok(points)
    }
}
