//! Core rendering functions
//! Primitive assembly and 2x2 supersampled triangle rasterization

use super::buffers::{ColBufId, GeometryBuffers, IndBufId, PosBufId};
use super::error::{BufferKind, RasterError, RasterResult};
use super::math::{barycentric_2d, is_collinear, Mat4, Vec3, Vec4};
use super::types::{Buffers, DrawStats, Primitive, Triangle};
use crate::config::{DepthRange, RasterConfig};

/// Sub-sample positions inside a pixel, relative to its lower-left corner
const SAMPLE_OFFSETS: [(usize, usize, f32, f32); 4] = [
    (0, 0, 0.25, 0.25),
    (1, 0, 0.75, 0.25),
    (0, 1, 0.25, 0.75),
    (1, 1, 0.75, 0.75),
];

/// Software rasterizer owning its frame, depth and geometry buffers
pub struct Rasterizer {
    width: usize,
    height: usize,
    depth_range: DepthRange,

    model: Mat4,
    view: Mat4,
    projection: Mat4,

    geometry: GeometryBuffers,

    frame_buf: Vec<Vec3>,   // Resolved color, one per pixel
    depth_buf: Vec<f32>,    // Nearest sample depth, one per pixel
    sample_depth: Vec<f32>, // One per sub-sample
    sample_color: Vec<Vec3>, // One per sub-sample
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> RasterResult<Self> {
        Self::with_config(RasterConfig {
            width,
            height,
            ..RasterConfig::default()
        })
    }

    pub fn with_config(config: RasterConfig) -> RasterResult<Self> {
        let RasterConfig { width, height, depth } = config;
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }

        let Some((pixels, samples)) = width
            .checked_mul(height)
            .and_then(|p| Some((p, p.checked_mul(4)?)))
        else {
            return Err(RasterError::InvalidDimensions { width, height });
        };

        Ok(Self {
            width,
            height,
            depth_range: depth,
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            geometry: GeometryBuffers::new(),
            frame_buf: vec![Vec3::ZERO; pixels],
            depth_buf: vec![f32::INFINITY; pixels],
            sample_depth: vec![f32::INFINITY; samples],
            sample_color: vec![Vec3::ZERO; samples],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn load_positions(&mut self, positions: Vec<Vec3>) -> PosBufId {
        self.geometry.load_positions(positions)
    }

    pub fn load_indices(&mut self, indices: Vec<[u32; 3]>) -> IndBufId {
        self.geometry.load_indices(indices)
    }

    pub fn load_colors(&mut self, colors: Vec<Vec3>) -> ColBufId {
        self.geometry.load_colors(colors)
    }

    pub fn set_model(&mut self, m: Mat4) {
        self.model = m;
    }

    pub fn set_view(&mut self, v: Mat4) {
        self.view = v;
    }

    pub fn set_projection(&mut self, p: Mat4) {
        self.projection = p;
    }

    pub fn clear(&mut self, buffers: Buffers) {
        if buffers.contains(Buffers::COLOR) {
            self.frame_buf.fill(Vec3::ZERO);
            self.sample_color.fill(Vec3::ZERO);
        }
        if buffers.contains(Buffers::DEPTH) {
            self.depth_buf.fill(f32::INFINITY);
            self.sample_depth.fill(f32::INFINITY);
        }
    }

    /// Resolved colors, row-major with the top row first
    pub fn frame_buffer(&self) -> &[Vec3] {
        &self.frame_buf
    }

    /// Nearest sample depth per pixel, same layout as [`frame_buffer`](Self::frame_buffer)
    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buf
    }

    /// Per sub-sample depth, bottom row first, two samples per pixel per row
    pub fn sample_depth_buffer(&self) -> &[f32] {
        &self.sample_depth
    }

    /// Color at output coordinates (top-left origin)
    pub fn pixel(&self, x: usize, y: usize) -> Option<Vec3> {
        if x < self.width && y < self.height {
            Some(self.frame_buf[y * self.width + x])
        } else {
            None
        }
    }

    /// Frame buffer index of logical pixel (x, y), where y = 0 is the bottom row
    fn index(&self, x: usize, y: usize) -> usize {
        (self.height - 1 - y) * self.width + x
    }

    fn sample_index(&self, x: usize, y: usize, sx: usize, sy: usize) -> usize {
        (x * 2 + sx) + (y * 2 + sy) * self.width * 2
    }

    /// Transform, project and rasterize every triangle of an index buffer
    ///
    /// All handles and indices are checked before any buffer is touched.
    pub fn draw(
        &mut self,
        pos_buffer: PosBufId,
        ind_buffer: IndBufId,
        col_buffer: ColBufId,
        primitive: Primitive,
    ) -> RasterResult<DrawStats> {
        if primitive != Primitive::Triangle {
            return Err(RasterError::UnsupportedPrimitive(primitive));
        }

        let triangles = self.assemble(pos_buffer, ind_buffer, col_buffer)?;

        let mut stats = DrawStats {
            triangles: triangles.len(),
            ..DrawStats::default()
        };
        for t in triangles {
            match t {
                Some(t) => {
                    let written = self.rasterize_triangle(&t);
                    if written == 0 && t.is_degenerate() {
                        stats.degenerate += 1;
                    }
                    stats.samples_written += written;
                }
                None => stats.degenerate += 1,
            }
        }

        log::debug!(
            "draw: {} triangles, {} degenerate, {} samples written",
            stats.triangles,
            stats.degenerate,
            stats.samples_written
        );
        Ok(stats)
    }

    /// Build screen-space triangles; `None` marks a collinear triangle or one with a zero or non-finite w
    fn assemble(
        &self,
        pos_buffer: PosBufId,
        ind_buffer: IndBufId,
        col_buffer: ColBufId,
    ) -> RasterResult<Vec<Option<Triangle>>> {
        let positions = self.geometry.positions(pos_buffer)?;
        let indices = self.geometry.indices(ind_buffer)?;
        let colors = self.geometry.colors(col_buffer)?;

        for (triangle, ind) in indices.iter().enumerate() {
            for &index in ind {
                let i = index as usize;
                if i >= positions.len() {
                    return Err(RasterError::IndexOutOfRange {
                        triangle,
                        index,
                        len: positions.len(),
                        buffer: BufferKind::Positions,
                    });
                }
                if i >= colors.len() {
                    return Err(RasterError::IndexOutOfRange {
                        triangle,
                        index,
                        len: colors.len(),
                        buffer: BufferKind::Colors,
                    });
                }
            }
        }

        let mvp = self.projection * self.view * self.model;

        let assembled = indices
            .iter()
            .enumerate()
            .map(|(n, ind)| {
                let [i0, i1, i2] = [ind[0] as usize, ind[1] as usize, ind[2] as usize];
                if is_collinear(positions[i0], positions[i1], positions[i2]) {
                    log::trace!("triangle {} skipped: collinear vertices", n);
                    return None;
                }
                let v = [
                    self.to_screen(mvp * positions[i0].extend(1.0))?,
                    self.to_screen(mvp * positions[i1].extend(1.0))?,
                    self.to_screen(mvp * positions[i2].extend(1.0))?,
                ];
                let t = Triangle::new(v, [colors[i0], colors[i1], colors[i2]]);
                if t.v.iter().any(|v| !v.is_finite()) {
                    log::trace!("triangle {} skipped: non-finite screen position", n);
                    return None;
                }
                Some(t)
            })
            .collect::<Vec<_>>();

        Ok(assembled)
    }

    /// Perspective division and viewport transform; w is kept as-is
    fn to_screen(&self, clip: Vec4) -> Option<Vec4> {
        if !clip.is_finite() || clip.w.abs() < f32::EPSILON {
            log::trace!("vertex skipped: clip w = {}", clip.w);
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        Some(Vec4 {
            x: 0.5 * self.width as f32 * (ndc.x + 1.0),
            y: 0.5 * self.height as f32 * (ndc.y + 1.0),
            z: self.depth_range.remap(ndc.z),
            w: clip.w,
        })
    }

    /// Rasterize a single triangle, returning the number of sub-samples it won
    fn rasterize_triangle(&mut self, t: &Triangle) -> usize {
        let [a, b, c] = t.v;
        let (xs, ys) = t.bounding_box(self.width, self.height);
        if xs.is_empty() || ys.is_empty() || t.is_degenerate() {
            return 0;
        }

        let color = t.flat_color();
        let mut written = 0;

        for j in ys {
            for i in xs.clone() {
                let mut covered = 0;

                for &(sx, sy, ox, oy) in &SAMPLE_OFFSETS {
                    let x = i as f32 + ox;
                    let y = j as f32 + oy;

                    let Some(bc) = barycentric_2d(x, y, a, b, c) else {
                        continue;
                    };
                    if bc.x < 0.0 || bc.y < 0.0 || bc.z < 0.0 {
                        continue;
                    }

                    // Perspective-correct depth
                    let w_reciprocal = 1.0 / (bc.x / a.w + bc.y / b.w + bc.z / c.w);
                    let z = w_reciprocal * (bc.x * a.z / a.w + bc.y * b.z / b.w + bc.z * c.z / c.w);
                    if !z.is_finite() {
                        continue;
                    }

                    // Camera looks down -z: smaller wins
                    let idx = self.sample_index(i, j, sx, sy);
                    if -z < self.sample_depth[idx] {
                        self.sample_depth[idx] = -z;
                        self.sample_color[idx] = color;
                        covered += 1;
                    }
                }

                if covered > 0 {
                    self.resolve_pixel(i, j);
                    written += covered;
                }
            }
        }

        written
    }

    /// Recompute a pixel from its four sub-samples
    fn resolve_pixel(&mut self, x: usize, y: usize) {
        let mut sum = Vec3::ZERO;
        let mut nearest = f32::INFINITY;
        for &(sx, sy, _, _) in &SAMPLE_OFFSETS {
            let idx = self.sample_index(x, y, sx, sy);
            sum = sum + self.sample_color[idx];
            nearest = nearest.min(self.sample_depth[idx]);
        }

        let idx = self.index(x, y);
        self.frame_buf[idx] = sum / 4.0;
        self.depth_buf[idx] = nearest;
    }
}
