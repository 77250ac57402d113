//! Physical disc layout and the mapping between data offsets and the track.

pub mod catalog;

pub use catalog::{DiskCatalog, DiskProfile};

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::ParamCurve;
use crate::math::{Point2, TRACK_TOLERANCE};

/// The four radii describing a disc, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskRadii {
    /// Edge of the centre hole.
    pub inner: f64,
    /// Outer edge of the disc.
    pub outer: f64,
    /// Where the first data unit sits on the track.
    pub data_inner: f64,
    /// Where the data region ends.
    pub data_outer: f64,
}

impl DiskRadii {
    /// Creates a new set of radii.
    #[must_use]
    pub fn new(inner: f64, outer: f64, data_inner: f64, data_outer: f64) -> Self {
        Self {
            inner,
            outer,
            data_inner,
            data_outer,
        }
    }

    fn validate(&self) -> Result<()> {
        let all = [self.inner, self.outer, self.data_inner, self.data_outer];
        if all.iter().any(|r| !r.is_finite()) {
            return Err(GeometryError::InvalidParameters("disk radii must be finite".into()).into());
        }
        if !(0.0 <= self.inner
            && self.inner <= self.data_inner
            && self.data_inner < self.data_outer
            && self.data_outer <= self.outer)
        {
            return Err(GeometryError::InvalidParameters(format!(
                "disk radii must satisfy 0 <= inner <= data_inner < data_outer <= outer, got {self:?}"
            ))
            .into());
        }
        Ok(())
    }
}

/// A disc whose data track follows `curve`.
///
/// Data unit `0` sits where the curve first reaches the inner data radius,
/// and each further unit advances `unit_length` millimetres along the track.
/// The parameters for both data radii are solved once at construction.
#[derive(Debug, Clone)]
pub struct DiskGeometry<C> {
    radii: DiskRadii,
    unit_length: f64,
    curve: C,
    t_inner: f64,
    arc_inner: f64,
    t_outer: f64,
}

impl<C: ParamCurve> DiskGeometry<C> {
    /// Creates a disk geometry.
    ///
    /// `unit_length` is the track length of one data unit in millimetres,
    /// including any encoding overhead.
    ///
    /// # Errors
    ///
    /// Returns an error if the radii are inconsistent, `unit_length` is not
    /// positive, or the curve never reaches the data radii.
    pub fn new(radii: DiskRadii, unit_length: f64, curve: C) -> Result<Self> {
        radii.validate()?;
        if !(unit_length.is_finite() && unit_length > 0.0) {
            return Err(GeometryError::InvalidParameters(format!(
                "unit length must be finite and positive, got {unit_length}"
            ))
            .into());
        }

        let t_inner = curve.find_parameter_for_radius(radii.data_inner, TRACK_TOLERANCE)?;
        let t_outer = curve.find_parameter_for_radius(radii.data_outer, TRACK_TOLERANCE)?;
        let arc_inner = curve.arc_length_up_to(t_inner);
        debug!("data region spans t = {t_inner} .. {t_outer}");

        Ok(Self {
            radii,
            unit_length,
            curve,
            t_inner,
            arc_inner,
            t_outer,
        })
    }

    #[must_use]
    pub fn radii(&self) -> &DiskRadii {
        &self.radii
    }

    #[must_use]
    pub fn unit_length(&self) -> f64 {
        self.unit_length
    }

    #[must_use]
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Parameter of the first data unit.
    #[must_use]
    pub fn t_inner(&self) -> f64 {
        self.t_inner
    }

    /// Parameter where the track reaches the outer data radius.
    #[must_use]
    pub fn t_outer(&self) -> f64 {
        self.t_outer
    }

    /// Converts a data offset to a curve parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc length search fails.
    pub fn byte_to_parameter(&self, offset: u64) -> Result<f64> {
        #[allow(clippy::cast_precision_loss)]
        let distance = offset as f64 * self.unit_length;
        self.curve
            .find_parameter_for_arc_length(self.arc_inner + distance, TRACK_TOLERANCE)
    }

    /// Converts a curve parameter to a (fractional) data offset.
    #[must_use]
    pub fn parameter_to_byte(&self, t: f64) -> f64 {
        (self.curve.arc_length_up_to(t) - self.arc_inner) / self.unit_length
    }

    /// Physical position of a data offset, in millimetres from the centre.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc length search fails.
    pub fn position_of_byte(&self, offset: u64) -> Result<Point2> {
        Ok(self.curve.position(self.byte_to_parameter(offset)?))
    }

    /// Number of data units that fit between the data radii.
    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.parameter_to_byte(self.t_outer)
    }

    /// Track length between the data radii, in millimetres.
    #[must_use]
    pub fn track_length(&self) -> f64 {
        self.curve.arc_length_up_to(self.t_outer) - self.arc_inner
    }
}
