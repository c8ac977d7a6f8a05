//! Software triangle rasterizer
//!
//! Features:
//! - Model / view / projection transform pipeline
//! - 2x2 supersampled coverage (4 samples per pixel)
//! - Perspective-correct depth with a per-sample depth buffer
//! - Per-sample color resolve, so overlapping triangles composite by depth

mod buffers;
mod error;
mod math;
mod render;
mod types;

pub use buffers::*;
pub use error::*;
pub use math::*;
pub use render::*;
pub use types::*;
