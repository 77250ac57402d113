use crate::disk::DiskGeometry;
use crate::error::Result;
use crate::geometry::ParamCurve;
use crate::mapfile::Interval;
use crate::math::Point2;

/// Default spacing of sampled points along the track, in millimetres.
pub const DEFAULT_TOLERANCE: f64 = 4.0;

/// How densely an interval's track is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// Consecutive points roughly this many millimetres apart along the track.
    Tolerance(f64),
    /// This many evenly spaced parameter steps.
    Count(usize),
}

impl Default for Sampling {
    fn default() -> Self {
        Self::Tolerance(DEFAULT_TOLERANCE)
    }
}

/// Samples the track under a data interval, in disc coordinates.
pub struct SampleInterval {
    interval: Interval,
    sampling: Sampling,
}

impl SampleInterval {
    /// Creates a new `SampleInterval` operation.
    #[must_use]
    pub fn new(interval: Interval, sampling: Sampling) -> Self {
        Self { interval, sampling }
    }

    /// Executes the sampling, returning points from the interval start to
    /// its end.
    ///
    /// # Errors
    ///
    /// Returns an error if an offset cannot be mapped to the track or the
    /// sampling parameters are invalid.
    pub fn execute<C: ParamCurve>(&self, disk: &DiskGeometry<C>) -> Result<Vec<Point2>> {
        let t0 = disk.byte_to_parameter(self.interval.start())?;
        let t1 = disk.byte_to_parameter(self.interval.end())?;
        let curve = disk.curve();
        match self.sampling {
            Sampling::Tolerance(epsilon) => curve.sample_by_tolerance(t0, t1, epsilon),
            Sampling::Count(n) => curve.sample_by_count(t0, t1, n),
        }
    }
}
