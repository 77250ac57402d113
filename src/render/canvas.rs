use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Maps disc coordinates onto a square SVG canvas.
///
/// Disc coordinates are millimetres from the disc centre with +y up. Canvas
/// coordinates have the origin at the top-left corner, +y down, and run from
/// `0` to `extent` on both axes so that the canvas border touches the outer
/// edge of the disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    extent: f64,
    radius: f64,
}

impl CanvasTransform {
    /// Creates a transform for a canvas `extent` units wide showing a disc of
    /// outer radius `radius`.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not finite and positive.
    pub fn new(extent: f64, radius: f64) -> Result<Self> {
        for (name, value) in [("extent", extent), ("radius", radius)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::InvalidParameters(format!(
                    "canvas {name} must be finite and positive, got {value}"
                ))
                .into());
            }
        }
        Ok(Self { extent, radius })
    }

    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Canvas units per millimetre.
    fn scale(&self) -> f64 {
        self.extent / (2.0 * self.radius)
    }

    #[must_use]
    pub fn disk_to_canvas(&self, p: Point2) -> Point2 {
        let half = 0.5 * self.extent;
        let s = self.scale();
        Point2::new(s * p.x + half, half - s * p.y)
    }

    #[must_use]
    pub fn canvas_to_disk(&self, p: Point2) -> Point2 {
        let half = 0.5 * self.extent;
        let s = self.scale();
        Point2::new((p.x - half) / s, (half - p.y) / s)
    }

    #[must_use]
    pub fn length_to_canvas(&self, length: f64) -> f64 {
        length * self.scale()
    }

    #[must_use]
    pub fn length_to_disk(&self, length: f64) -> f64 {
        length / self.scale()
    }

    /// Centre of the disc on the canvas.
    #[must_use]
    pub fn centre(&self) -> Point2 {
        self.disk_to_canvas(Point2::origin())
    }
}
