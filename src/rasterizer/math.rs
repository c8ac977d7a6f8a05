//! Vector and matrix math for the transform pipeline
//!
//! Matrices are stored row-major and applied to column vectors (`m * v`).

use std::ops::{Add, Div, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector (positions, colors)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        self.scale(1.0 / l)
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Lift to homogeneous form
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x / s,
            y: self.y / s,
            z: self.z / s,
        }
    }
}

/// Homogeneous 4D vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn is_finite(self) -> bool {
        self.xyz().is_finite() && self.w.is_finite()
    }
}

/// 4x4 matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub rows: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    pub fn translation(t: Vec3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, t.x],
            [0.0, 1.0, 0.0, t.y],
            [0.0, 0.0, 1.0, t.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(s: Vec3) -> Self {
        Self::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn row(&self, r: usize) -> Vec4 {
        let [x, y, z, w] = self.rows[r];
        Vec4::new(x, y, z, w)
    }

    pub fn col(&self, c: usize) -> Vec4 {
        Vec4::new(self.rows[0][c], self.rows[1][c], self.rows[2][c], self.rows[3][c])
    }

}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self.row(r).dot(other.col(c));
            }
        }
        Mat4 { rows: out }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        Vec4 {
            x: self.row(0).dot(v),
            y: self.row(1).dot(v),
            z: self.row(2).dot(v),
            w: self.row(3).dot(v),
        }
    }
}

/// Twice the signed area of the 2D triangle (a, b, c); positive when counter-clockwise
pub fn signed_area(a: Vec4, b: Vec4, c: Vec4) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Tolerance for area tests, in units of rounding error
const AREA_ULPS: f32 = 64.0;

/// True when three model-space points lie on one line (or coincide)
///
/// Projective transforms keep lines straight, so such a triangle has zero
/// screen area no matter what rounding the transform adds.
pub fn is_collinear(a: Vec3, b: Vec3, c: Vec3) -> bool {
    let e1 = b - a;
    let e2 = c - a;
    e1.cross(e2).len() <= AREA_ULPS * f32::EPSILON * e1.len() * e2.len()
}

/// True when the screen-space triangle has no area beyond rounding noise
///
/// Coordinate error grows with coordinate magnitude, so the tolerance scales
/// with the longest edge and the largest coordinate.
pub fn is_degenerate_2d(a: Vec4, b: Vec4, c: Vec4) -> bool {
    let edge = |p: Vec4, q: Vec4| ((q.x - p.x).powi(2) + (q.y - p.y).powi(2)).sqrt();
    let longest = edge(a, b).max(edge(b, c)).max(edge(c, a));
    let magnitude = [a.x, a.y, b.x, b.y, c.x, c.y]
        .iter()
        .fold(1.0f32, |m, v| m.max(v.abs()));
    let area = signed_area(a, b, c);
    !(area.abs() > AREA_ULPS * f32::EPSILON * longest * magnitude)
}

/// Calculate barycentric coordinates for point (x, y) in triangle (v0, v1, v2)
///
/// Returns `None` for degenerate (zero-area) triangles.
/// The three weights sum to 1; all are non-negative iff the point is inside.
pub fn barycentric_2d(x: f32, y: f32, v0: Vec4, v1: Vec4, v2: Vec4) -> Option<Vec3> {
    if is_degenerate_2d(v0, v1, v2) {
        return None;
    }
    let area = signed_area(v0, v1, v2);

    let p = Vec4::new(x, y, 0.0, 1.0);
    let alpha = signed_area(p, v1, v2) / area;
    let beta = signed_area(v0, p, v2) / area;
    let gamma = 1.0 - alpha - beta;

    Some(Vec3::new(alpha, beta, gamma))
}
