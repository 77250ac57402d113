//! Maps damaged regions of an optical disc image onto the disc itself.
//!
//! Byte offsets from a ddrescue mapfile are placed on the disc's spiral track
//! by solving for the track parameter at a given arc length, and each damaged
//! interval is drawn as a smooth SVG path following the track.

pub mod config;
pub mod disk;
pub mod error;
pub mod geometry;
pub mod mapfile;
pub mod math;
pub mod render;

pub use error::{DiscmapError, Result};
