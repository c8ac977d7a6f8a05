//! Core types for the rasterizer

use bitflags::bitflags;
use super::math::{is_degenerate_2d, Vec3, Vec4};

/// Kind of primitive an index buffer describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Line,
    Triangle,
}

bitflags! {
    /// Buffers reset by [`Rasterizer::clear`](super::Rasterizer::clear)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buffers: u8 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Screen-space triangle ready for rasterization
///
/// Vertices hold pixel-space x/y, remapped depth in z and the clip-space w
/// kept for perspective-correct interpolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangle {
    pub v: [Vec4; 3],
    pub color: [Vec3; 3],
}

impl Triangle {
    pub fn new(v: [Vec4; 3], color: [Vec3; 3]) -> Self {
        Self { v, color }
    }

    /// Flat color used for the whole triangle: the first vertex's
    pub fn flat_color(&self) -> Vec3 {
        self.color[0]
    }

    /// Zero screen-space area, up to rounding
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.v;
        is_degenerate_2d(a, b, c)
    }

    /// Pixel-space bounding box clamped to `[0, width) x [0, height)`
    ///
    /// Returns half-open ranges `(x0..x1, y0..y1)`; empty when the triangle lies off screen.
    pub fn bounding_box(&self, width: usize, height: usize) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let [a, b, c] = self.v;
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0);
        let max_x = a.x.max(b.x).max(c.x).ceil().min(width as f32);
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0);
        let max_y = a.y.max(b.y).max(c.y).ceil().min(height as f32);

        // Saturating float-to-int casts; NaN collapses to 0
        let x0 = min_x as usize;
        let x1 = (max_x as usize).max(x0);
        let y0 = min_y as usize;
        let y1 = (max_y as usize).max(y0);
        (x0..x1, y0..y1)
    }
}

/// Per-draw counters, returned by [`Rasterizer::draw`](super::Rasterizer::draw)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Index triples processed
    pub triangles: usize,
    /// Triangles dropped for zero area, zero w, or non-finite coordinates
    pub degenerate: usize,
    /// Sub-samples that passed the depth test
    pub samples_written: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(points: [(f32, f32); 3]) -> Triangle {
        let v = points.map(|(x, y)| Vec4::new(x, y, 0.0, 1.0));
        Triangle::new(v, [Vec3::ONE; 3])
    }

    #[test]
    fn test_bounding_box_clamped() {
        let t = tri([(-5.0, -5.0), (20.0, 1.5), (2.2, 30.0)]);
        let (xs, ys) = t.bounding_box(8, 6);
        assert_eq!(xs, 0..8);
        assert_eq!(ys, 0..6);
    }

    #[test]
    fn test_bounding_box_offscreen_is_empty() {
        let t = tri([(-9.0, 1.0), (-5.0, 1.0), (-7.0, 3.0)]);
        let (xs, _) = t.bounding_box(8, 6);
        assert!(xs.is_empty());

        let t = tri([(1.0, 10.0), (3.0, 10.0), (2.0, 12.0)]);
        let (_, ys) = t.bounding_box(8, 6);
        assert!(ys.is_empty());
    }

    #[test]
    fn test_buffers_flags_combine() {
        let both = Buffers::COLOR | Buffers::DEPTH;
        assert!(both.contains(Buffers::COLOR));
        assert!(both.contains(Buffers::DEPTH));
        assert!(!Buffers::empty().contains(Buffers::COLOR));
    }
}
