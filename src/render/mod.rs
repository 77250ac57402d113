//! Turning intervals into SVG: sampling, path descriptors and the scene.

pub mod canvas;
pub mod path;
pub mod sample;
pub mod scene;
pub mod style;

pub use canvas::CanvasTransform;
pub use path::{smooth_path, SmoothCommand};
pub use sample::{SampleInterval, Sampling};
pub use scene::{region_shape, DiskScene, RegionShape, SceneOptions};
pub use style::StrokeStyle;
