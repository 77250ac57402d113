pub mod search;

pub use search::{search, search_with, Monotonicity, SearchParams};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Micrometres to millimetres.
pub const MICRON_TO_MM: f64 = 1.0e-3;

/// Nanometres to millimetres.
pub const NANOMETER_TO_MM: f64 = 1.0e-6;

/// Tolerance used when solving for track positions, in millimetres.
pub const TRACK_TOLERANCE: f64 = NANOMETER_TO_MM / 10.0;
