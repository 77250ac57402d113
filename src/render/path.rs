use serde::{Deserialize, Serialize};
use svg::node::element::path::{Data, Number};

use crate::error::{PathError, Result};
use crate::math::Point2;

/// SVG command used to draw a smooth curve through points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothCommand {
    /// `S`, smooth cubic Bézier. Takes points in pairs.
    #[default]
    Cubic,
    /// `T`, smooth quadratic Bézier.
    Quadratic,
}

/// Builds path data that moves to the first point and draws a smooth curve
/// through the rest, e.g. `M1,2 S3,4,5,6`.
///
/// An even number of points gets its last point repeated, so the points
/// after the move come in pairs.
///
/// # Errors
///
/// Returns [`PathError::MalformedPathInput`] for fewer than 3 points; draw
/// those as straight lines instead.
pub fn smooth_path(points: &[Point2], command: SmoothCommand) -> Result<Data> {
    let (first, rest) = match points {
        [first, rest @ ..] if points.len() >= 3 => (first, rest),
        _ => return Err(PathError::MalformedPathInput(points.len()).into()),
    };

    let mut coords: Vec<Number> = rest
        .iter()
        .flat_map(|p| [svg_number(p.x), svg_number(p.y)])
        .collect();
    if points.len() % 2 == 0 {
        let last = rest[rest.len() - 1];
        coords.extend([svg_number(last.x), svg_number(last.y)]);
    }

    let data = Data::new().move_to((svg_number(first.x), svg_number(first.y)));
    Ok(match command {
        SmoothCommand::Cubic => data.smooth_cubic_curve_to(coords),
        SmoothCommand::Quadratic => data.smooth_quadratic_curve_to(coords),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn svg_number(v: f64) -> Number {
    v as Number
}
