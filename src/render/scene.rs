use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Line, Path};
use svg::Document;
use tracing::{debug, warn};

use crate::disk::DiskGeometry;
use crate::error::Result;
use crate::geometry::ParamCurve;
use crate::mapfile::{Category, Interval, Mapfile};
use crate::math::Point2;

use super::canvas::CanvasTransform;
use super::path::{smooth_path, SmoothCommand};
use super::sample::{SampleInterval, Sampling};
use super::style::StrokeStyle;

/// Everything that controls how a disc scene is drawn.
#[derive(Debug, Clone)]
pub struct SceneOptions {
    /// Width and height of the SVG view box.
    pub extent: f64,
    pub sampling: Sampling,
    pub command: SmoothCommand,
    pub bad: StrokeStyle,
    pub unknown: StrokeStyle,
    /// Stroke width of the disc outline circles.
    pub border_width: f64,
    /// Radius of the dots marking the first and last data positions.
    pub marker_radius: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            extent: 100.0,
            sampling: Sampling::default(),
            command: SmoothCommand::default(),
            bad: StrokeStyle::for_category(Category::Bad),
            unknown: StrokeStyle::for_category(Category::Unknown),
            border_width: 0.5,
            marker_radius: 1.0,
        }
    }
}

impl SceneOptions {
    #[must_use]
    pub fn style(&self, category: Category) -> &StrokeStyle {
        match category {
            Category::Bad => &self.bad,
            Category::Unknown => &self.unknown,
        }
    }
}

/// Shape drawn for one interval, in canvas coordinates.
#[derive(Debug, Clone)]
pub enum RegionShape {
    /// Smooth path through three or more points.
    Path(Data),
    /// Two points are too few for a smooth path.
    Line(Point2, Point2),
}

/// Computes the shape of one interval on the canvas.
///
/// Returns `None` for an empty interval, or one whose samples collapse to a
/// single track position.
///
/// # Errors
///
/// Returns an error if sampling or path emission fails.
pub fn region_shape<C: ParamCurve>(
    disk: &DiskGeometry<C>,
    canvas: &CanvasTransform,
    interval: Interval,
    options: &SceneOptions,
) -> Result<Option<RegionShape>> {
    if interval.is_empty() {
        return Ok(None);
    }
    let points: Vec<Point2> = SampleInterval::new(interval, options.sampling)
        .execute(disk)?
        .into_iter()
        .map(|p| canvas.disk_to_canvas(p))
        .collect();

    match points.as_slice() {
        [] | [_] => Ok(None),
        [a, b] => Ok(Some(RegionShape::Line(*a, *b))),
        _ => Ok(Some(RegionShape::Path(smooth_path(&points, options.command)?))),
    }
}

/// Builds the SVG scene for a disc and its damaged regions.
pub struct DiskScene<'a, C> {
    disk: &'a DiskGeometry<C>,
    options: &'a SceneOptions,
}

impl<'a, C: ParamCurve> DiskScene<'a, C> {
    #[must_use]
    pub fn new(disk: &'a DiskGeometry<C>, options: &'a SceneOptions) -> Self {
        Self { disk, options }
    }

    /// Renders every interval of every drawn category in `mapfile`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or any interval fails to
    /// render.
    pub fn render(&self, mapfile: &Mapfile) -> Result<Document> {
        let regions: Vec<(Category, Vec<Interval>)> = Category::ALL
            .iter()
            .map(|&c| (c, mapfile.intervals(c)))
            .collect();
        self.render_regions(&regions)
    }

    /// Renders the given intervals, one group per category.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or any interval fails to
    /// render.
    pub fn render_regions(&self, regions: &[(Category, Vec<Interval>)]) -> Result<Document> {
        let canvas = CanvasTransform::new(self.options.extent, self.disk.radii().outer)?;

        let mut master = Group::new()
            .set("id", "masterGroup")
            .set("fill-opacity", 0)
            .add(self.border_group(&canvas));

        for (category, intervals) in regions {
            master = master.add(self.category_group(&canvas, *category, intervals)?);
        }

        let extent = self.options.extent;
        Ok(Document::new()
            .set("viewBox", (0.0, 0.0, extent, extent))
            .add(master))
    }

    /// Disc edges, data region edges and markers at both ends of the data.
    fn border_group(&self, canvas: &CanvasTransform) -> Group {
        let radii = self.disk.radii();
        let centre = canvas.centre();

        let mut group = Group::new()
            .set("id", "diskBorder")
            .set("stroke", "black")
            .set("stroke-width", self.options.border_width);

        for r in [radii.inner, radii.outer, radii.data_inner, radii.data_outer] {
            group = group.add(
                Circle::new()
                    .set("cx", centre.x)
                    .set("cy", centre.y)
                    .set("r", canvas.length_to_canvas(r)),
            );
        }

        let curve = self.disk.curve();
        for t in [self.disk.t_inner(), self.disk.t_outer()] {
            let p = canvas.disk_to_canvas(curve.position(t));
            group = group.add(
                Circle::new()
                    .set("cx", p.x)
                    .set("cy", p.y)
                    .set("r", self.options.marker_radius),
            );
        }
        group
    }

    fn category_group(
        &self,
        canvas: &CanvasTransform,
        category: Category,
        intervals: &[Interval],
    ) -> Result<Group> {
        let style = self.options.style(category);
        style.validate()?;

        let mut group = Group::new()
            .set("id", format!("{category}Areas"))
            .set("stroke", style.color.as_str())
            .set("stroke-width", style.width)
            .set("opacity", style.opacity);

        for &interval in intervals {
            match region_shape(self.disk, canvas, interval, self.options)? {
                Some(RegionShape::Path(d)) => {
                    group = group.add(Path::new().set("d", d));
                }
                Some(RegionShape::Line(a, b)) => {
                    group = group.add(
                        Line::new()
                            .set("x1", a.x)
                            .set("y1", a.y)
                            .set("x2", b.x)
                            .set("y2", b.y),
                    );
                }
                None => warn!(
                    "skipping {category} interval {}..{}: covers no track length",
                    interval.start(),
                    interval.end()
                ),
            }
        }
        debug!("rendered {} {category} intervals", intervals.len());
        Ok(group)
    }
}
