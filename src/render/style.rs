use crate::error::{GeometryError, Result};
use crate::mapfile::Category;

/// Stroke used to draw the regions of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    /// Any SVG colour value.
    pub color: String,
    /// Stroke width in canvas units.
    pub width: f64,
    pub opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "black".to_owned(),
            width: 0.1,
            opacity: 0.5,
        }
    }
}

impl StrokeStyle {
    /// Creates a new stroke style.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive or `opacity` is outside
    /// `[0, 1]`.
    pub fn new(color: impl Into<String>, width: f64, opacity: f64) -> Result<Self> {
        let style = Self {
            color: color.into(),
            width,
            opacity,
        };
        style.validate()?;
        Ok(style)
    }

    /// Default style for a category: red for bad areas, yellow for unknown.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        let color = match category {
            Category::Bad => "red",
            Category::Unknown => "yellow",
        };
        Self {
            color: color.to_owned(),
            ..Self::default()
        }
    }

    /// Checks the style, e.g. after loading it from a config file.
    ///
    /// # Errors
    ///
    /// See [`StrokeStyle::new`].
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(GeometryError::InvalidParameters(
                "stroke width must be positive".to_owned(),
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(GeometryError::InvalidParameters(
                "stroke opacity must be within [0, 1]".to_owned(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_with_valid_width() {
        let style = StrokeStyle::new("red", 2.0, 1.0).unwrap();
        assert!((style.width - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_with_zero_width_fails() {
        assert!(StrokeStyle::new("red", 0.0, 1.0).is_err());
    }

    #[test]
    fn new_with_negative_width_fails() {
        assert!(StrokeStyle::new("red", -1.0, 1.0).is_err());
    }

    #[test]
    fn opacity_out_of_range_fails() {
        assert!(StrokeStyle::new("red", 1.0, 1.5).is_err());
        assert!(StrokeStyle::new("red", 1.0, f64::NAN).is_err());
    }

    #[test]
    fn category_defaults_differ() {
        assert_eq!(StrokeStyle::for_category(Category::Bad).color, "red");
        assert_eq!(StrokeStyle::for_category(Category::Unknown).color, "yellow");
    }
}
