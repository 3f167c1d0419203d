//! Recolor single-colored graphic elements.
//!
//! The most saturated pixel of an image is taken as its "original" colour.
//! Every pixel is then moved in HSV space by the distance from that colour
//! to a target colour, weighted by how saturated the pixel is.

pub mod color_spec;
pub mod config;
pub mod cst;
pub mod error;
pub mod image;
pub mod mask;
pub mod output;
pub mod parallel;
pub mod pipeline;
pub mod pixels;
pub mod prompt;
pub mod recolor;

pub use error::{RecolorError, Result};
pub use recolor::transform;
