//! trirast: software triangle rasterizer
//!
//! Geometry is registered once as position, index and color buffers, then
//! drawn through a model-view-projection pipeline into a flat color buffer:
//!
//! ```
//! use trirast::rasterizer::{Buffers, Primitive, Rasterizer, Vec3};
//!
//! let mut r = Rasterizer::new(4, 4)?;
//! let pos = r.load_positions(vec![
//!     Vec3::new(-1.0, -1.0, -1.0),
//!     Vec3::new(3.0, -1.0, -1.0),
//!     Vec3::new(-1.0, 3.0, -1.0),
//! ]);
//! let ind = r.load_indices(vec![[0, 1, 2]]);
//! let col = r.load_colors(vec![Vec3::new(1.0, 0.0, 0.0); 3]);
//!
//! r.clear(Buffers::COLOR | Buffers::DEPTH);
//! r.draw(pos, ind, col, Primitive::Triangle)?;
//! assert_eq!(r.pixel(0, 0), Some(Vec3::new(1.0, 0.0, 0.0)));
//! # Ok::<(), trirast::rasterizer::RasterError>(())
//! ```

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod output;
pub mod rasterizer;
pub mod scene;
pub mod transform;
